// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait shared by the completion provider and the store.

use async_trait::async_trait;

use crate::error::ItineraError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Itinera adapters.
///
/// Provides identity, lifecycle, and health check capabilities so the
/// gateway can report on every backing service from one place.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the type of adapter.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, ItineraError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), ItineraError>;
}
