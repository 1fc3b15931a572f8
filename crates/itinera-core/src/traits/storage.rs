// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Itinerary store trait for persistence backends.

use async_trait::async_trait;

use crate::error::ItineraError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Itinerary, NewItinerary};

/// Persistence for itinerary records.
///
/// Records are immutable after creation except for the favorite flag.
/// There is no delete.
#[async_trait]
pub trait ItineraryStore: PluginAdapter {
    /// Inserts a record, assigning its identifier and any unset defaults.
    async fn create(&self, new: NewItinerary) -> Result<Itinerary, ItineraError>;

    /// Returns every record, most recently created first.
    async fn list(&self) -> Result<Vec<Itinerary>, ItineraError>;

    /// Sets the favorite flag and returns the updated record,
    /// or `None` when no record has this identifier.
    async fn set_favorite(
        &self,
        id: &str,
        is_favorite: bool,
    ) -> Result<Option<Itinerary>, ItineraError>;
}
