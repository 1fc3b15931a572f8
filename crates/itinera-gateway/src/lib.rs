// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Itinera travel planner.
//!
//! Exposes the completion relay and the itinerary store as a JSON API.
//! Every failure is caught at the handler boundary and returned as an
//! `{"error": "..."}` envelope.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use handlers::SuccessResponse;
pub use server::{build_router, serve, start_server, GatewayState, HealthState, ServerConfig};
