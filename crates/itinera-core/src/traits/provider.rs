// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for chat-completion backends.

use async_trait::async_trait;

use crate::error::ItineraError;
use crate::traits::adapter::PluginAdapter;

/// A chat-completion backend.
///
/// One call is one upstream round trip: the message is sent as a single
/// user-role turn and the upstream JSON comes back untouched.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    async fn complete(&self, message: &str) -> Result<serde_json::Value, ItineraError>;
}
