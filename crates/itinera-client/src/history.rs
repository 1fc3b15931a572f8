// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! State of the history page.
//!
//! Holds the fetched records and two local filters. Filtering never
//! re-fetches, and a favorite toggle only patches the one record it touched.

use std::collections::{HashMap, HashSet};

use itinera_core::{Itinerary, ItineraError};
use tracing::debug;

use crate::api::{ApiOutcome, ItineraClient};
use crate::CONNECTION_ERROR;

#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    records: Vec<Itinerary>,
    fetching: bool,
    banner: Option<String>,
    query: String,
    favorites_only: bool,
    pending: HashSet<String>,
    item_errors: HashMap<String, String>,
    detail: Option<String>,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Itinerary] {
        &self.records
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn begin_load(&mut self) {
        self.fetching = true;
        self.banner = None;
    }

    /// Replace the record set. Any failure leaves it empty.
    pub fn finish_load(&mut self, result: Result<ApiOutcome<Vec<Itinerary>>, ItineraError>) {
        self.fetching = false;
        self.pending.clear();
        self.item_errors.clear();
        match result {
            Ok(ApiOutcome::Success(records)) => {
                debug!(count = records.len(), "history loaded");
                self.records = records;
            }
            Ok(ApiOutcome::Failure { message, .. }) => {
                self.records.clear();
                self.banner = Some(message);
            }
            Err(e) => {
                debug!(error = %e, "history request did not reach the server");
                self.records.clear();
                self.banner = Some(CONNECTION_ERROR.to_string());
            }
        }
    }

    pub async fn load(&mut self, client: &ItineraClient) {
        self.begin_load();
        let result = client.history().await;
        self.finish_load(result);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.favorites_only = favorites_only;
    }

    /// Records passing both filters, in fetch order.
    pub fn visible(&self) -> Vec<&Itinerary> {
        self.records
            .iter()
            .filter(|r| !self.favorites_only || r.is_favorite)
            .filter(|r| r.matches_query(&self.query))
            .collect()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    /// Mark `id` as in flight and return the flag value to send.
    ///
    /// `None` when the record is unknown or already has a toggle in flight.
    pub fn begin_toggle_favorite(&mut self, id: &str) -> Option<bool> {
        if self.pending.contains(id) {
            return None;
        }
        let current = self.records.iter().find(|r| r.id == id)?.is_favorite;
        self.pending.insert(id.to_string());
        self.item_errors.remove(id);
        Some(!current)
    }

    pub fn finish_toggle_favorite(
        &mut self,
        id: &str,
        result: Result<ApiOutcome<Itinerary>, ItineraError>,
    ) {
        self.pending.remove(id);
        let message = match result {
            Ok(ApiOutcome::Success(updated)) => {
                if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
                    record.is_favorite = updated.is_favorite;
                }
                return;
            }
            Ok(ApiOutcome::Failure { message, .. }) => message,
            Err(e) => {
                debug!(error = %e, id, "favorite request did not reach the server");
                CONNECTION_ERROR.to_string()
            }
        };
        self.item_errors.insert(id.to_string(), message);
    }

    pub async fn toggle_favorite(&mut self, client: &ItineraClient, id: &str) {
        if let Some(is_favorite) = self.begin_toggle_favorite(id) {
            let result = client.set_favorite(id, is_favorite).await;
            self.finish_toggle_favorite(id, result);
        }
    }

    /// Error scoped to one record.
    pub fn item_error(&self, id: &str) -> Option<&str> {
        self.item_errors.get(id).map(String::as_str)
    }

    pub fn dismiss_item_error(&mut self, id: &str) {
        self.item_errors.remove(id);
    }

    /// Open the full text of one record. Returns it when the id is known.
    pub fn open_detail(&mut self, id: &str) -> Option<&Itinerary> {
        let index = self.records.iter().position(|r| r.id == id)?;
        self.detail = Some(id.to_string());
        self.records.get(index)
    }

    pub fn detail(&self) -> Option<&Itinerary> {
        let id = self.detail.as_deref()?;
        self.records.iter().find(|r| r.id == id)
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}
