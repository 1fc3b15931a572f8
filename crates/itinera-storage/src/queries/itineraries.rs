// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Itinerary create, list, and favorite toggle.

use chrono::SubsecRound;
use itinera_core::types::{now_millis, timestamp};
use itinera_core::{Itinerary, ItineraError, NewItinerary};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

const SELECT_COLUMNS: &str = "SELECT id, prompt, itinerary, created_date, is_favorite FROM itineraries";

fn row_to_itinerary(row: &rusqlite::Row<'_>) -> Result<Itinerary, rusqlite::Error> {
    let raw_date: String = row.get(3)?;
    let created_date = timestamp::parse(&raw_date).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Itinerary {
        id: row.get(0)?,
        prompt: row.get(1)?,
        itinerary: row.get(2)?,
        created_date,
        is_favorite: row.get(4)?,
    })
}

/// Insert a new record. The identifier is always generated here; the date
/// and favorite flag default to now and `false`.
pub async fn insert(db: &Database, new: NewItinerary) -> Result<Itinerary, ItineraError> {
    let record = Itinerary {
        id: uuid::Uuid::new_v4().to_string(),
        prompt: new.prompt,
        itinerary: new.itinerary,
        created_date: new
            .created_date
            .map(|dt| dt.trunc_subsecs(3))
            .unwrap_or_else(now_millis),
        is_favorite: new.is_favorite.unwrap_or(false),
    };

    let row = record.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO itineraries (id, prompt, itinerary, created_date, is_favorite)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    row.id,
                    row.prompt,
                    row.itinerary,
                    timestamp::format(&row.created_date),
                    row.is_favorite,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(record)
}

/// All records, newest first. Records sharing a timestamp come back in
/// reverse insertion order.
pub async fn list(db: &Database) -> Result<Vec<Itinerary>, ItineraError> {
    db.connection()
        .call(|conn| -> Result<Vec<Itinerary>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY created_date DESC, rowid DESC"
            ))?;
            let records = stmt
                .query_map([], row_to_itinerary)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

/// Set the favorite flag and return the updated record, or `None` when the
/// id is unknown.
pub async fn set_favorite(
    db: &Database,
    id: &str,
    is_favorite: bool,
) -> Result<Option<Itinerary>, ItineraError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Itinerary>, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE itineraries SET is_favorite = ?1 WHERE id = ?2",
                params![is_favorite, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            match stmt.query_row(params![id], row_to_itinerary) {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}
