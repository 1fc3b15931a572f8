// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ItineraryStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use itinera_config::model::StorageConfig;
use itinera_core::{
    AdapterType, HealthStatus, Itinerary, ItineraError, ItineraryStore, NewItinerary,
    PluginAdapter,
};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed itinerary store.
///
/// Holds one [`Database`] for the life of the process. The database is
/// opened by [`SqliteStorage::initialize`]; every other call fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Construct and initialize in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, ItineraError> {
        let storage = Self::new(config);
        storage.initialize().await?;
        Ok(storage)
    }

    /// Open the database and run migrations. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), ItineraError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ItineraError::Storage {
            source: "storage already initialized".into(),
        })?;
        info!(path = %self.config.database_path, "itinerary store ready");
        Ok(())
    }

    fn db(&self) -> Result<&Database, ItineraError> {
        self.db.get().ok_or_else(|| ItineraError::Storage {
            source: "storage not initialized".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ItineraError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ItineraError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ItineraryStore for SqliteStorage {
    async fn create(&self, new: NewItinerary) -> Result<Itinerary, ItineraError> {
        let record = queries::itineraries::insert(self.db()?, new).await?;
        debug!(id = %record.id, "itinerary created");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Itinerary>, ItineraError> {
        queries::itineraries::list(self.db()?).await
    }

    async fn set_favorite(
        &self,
        id: &str,
        is_favorite: bool,
    ) -> Result<Option<Itinerary>, ItineraError> {
        let updated = queries::itineraries::set_favorite(self.db()?, id, is_favorite).await?;
        debug!(id, is_favorite, found = updated.is_some(), "favorite updated");
        Ok(updated)
    }
}
