// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Itinera travel planner.
//!
//! This crate provides the error type, the itinerary record and completion
//! types, the prompt validator, and the adapter traits that the storage and
//! provider crates implement.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::ItineraError;
pub use types::{AdapterType, ChatCompletion, HealthStatus, Itinerary, NewItinerary};
pub use validation::is_travel_prompt;

pub use traits::{CompletionProvider, ItineraryStore, PluginAdapter};
