// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client side of the Itinera travel planner.
//!
//! [`ItineraClient`] talks to the gateway over HTTP and returns tagged
//! [`ApiOutcome`] values. [`GenerationView`] and [`HistoryView`] hold the
//! state of the two pages and drive the client.

pub mod api;
pub mod generate;
pub mod history;

pub use api::{ApiOutcome, ItineraClient};
pub use generate::{GenerationPhase, GenerationView};
pub use history::HistoryView;

/// Banner shown when the server cannot be reached at all.
pub const CONNECTION_ERROR: &str = "Error connecting to server.";
