// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Itinera workspace.

use thiserror::Error;

/// The primary error type used across all Itinera adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ItineraError {
    /// Configuration errors (invalid TOML, missing credentials, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (upstream unreachable or non-success status).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Client-side transport errors: the Itinera server could not be reached
    /// or its response body could not be read.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ItineraError {
    /// Human-readable description without the variant prefix.
    ///
    /// This is the text surfaced to HTTP callers in the `{"error": ...}` envelope.
    pub fn description(&self) -> String {
        match self {
            ItineraError::Config(msg) | ItineraError::Internal(msg) => msg.clone(),
            ItineraError::Storage { source } => source.to_string(),
            ItineraError::Provider { message, .. } | ItineraError::Transport { message, .. } => {
                message.clone()
            }
        }
    }
}
