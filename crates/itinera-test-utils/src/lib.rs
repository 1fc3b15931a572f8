// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Itinera integration tests.
//!
//! Provides a mock completion provider and a harness that runs the real
//! gateway over a temporary SQLite store, so tests need no network access
//! beyond loopback.
//!
//! # Components
//!
//! - [`MockCompletionProvider`] - canned completions or failures, in order
//! - [`FailingItineraryStore`] - a store whose every call errors
//! - [`TestHarness`] - gateway + temp store + mock provider on `127.0.0.1:0`

pub mod harness;
pub mod mock_provider;
pub mod mock_store;

pub use harness::TestHarness;
pub use mock_provider::{completion_json, MockCompletionProvider, MockReply};
pub use mock_store::FailingItineraryStore;
