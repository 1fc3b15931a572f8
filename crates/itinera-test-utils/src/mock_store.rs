// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Itinerary store whose every operation fails.

use async_trait::async_trait;

use itinera_core::traits::{ItineraryStore, PluginAdapter};
use itinera_core::types::{AdapterType, HealthStatus, Itinerary, NewItinerary};
use itinera_core::ItineraError;

/// Stands in for an unreachable database. Each call returns a storage error
/// carrying `message`.
pub struct FailingItineraryStore {
    message: String,
}

impl FailingItineraryStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> ItineraError {
        ItineraError::Storage {
            source: self.message.clone().into(),
        }
    }
}

#[async_trait]
impl PluginAdapter for FailingItineraryStore {
    fn name(&self) -> &str {
        "failing-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ItineraError> {
        Ok(HealthStatus::Unhealthy(self.message.clone()))
    }

    async fn shutdown(&self) -> Result<(), ItineraError> {
        Ok(())
    }
}

#[async_trait]
impl ItineraryStore for FailingItineraryStore {
    async fn create(&self, _new: NewItinerary) -> Result<Itinerary, ItineraError> {
        Err(self.error())
    }

    async fn list(&self) -> Result<Vec<Itinerary>, ItineraError> {
        Err(self.error())
    }

    async fn set_favorite(
        &self,
        _id: &str,
        _is_favorite: bool,
    ) -> Result<Option<Itinerary>, ItineraError> {
        Err(self.error())
    }
}
