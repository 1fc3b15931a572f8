// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use itinera_core::traits::{CompletionProvider, PluginAdapter};
use itinera_core::types::{AdapterType, HealthStatus};
use itinera_core::ItineraError;

/// Default text returned when the reply queue is empty.
pub const DEFAULT_MOCK_CONTENT: &str = "mock itinerary";

/// One queued outcome of a `complete` call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A well-formed completion whose first candidate has this text.
    Content(String),
    /// An arbitrary JSON body, returned as-is.
    Raw(serde_json::Value),
    /// A provider failure carrying this message.
    Fail(String),
}

/// Chat-completion JSON with a single candidate.
pub fn completion_json(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// A completion provider that pops replies from a FIFO queue and records
/// every message it was asked to complete.
pub struct MockCompletionProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue one more reply behind those already waiting.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Messages passed to `complete`, oldest first.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockCompletionProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ItineraError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ItineraError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, message: &str) -> Result<serde_json::Value, ItineraError> {
        self.received.lock().await.push(message.to_string());
        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Content(DEFAULT_MOCK_CONTENT.to_string()));

        match reply {
            MockReply::Content(text) => Ok(completion_json(&text)),
            MockReply::Raw(value) => Ok(value),
            MockReply::Fail(message) => Err(ItineraError::Provider {
                message,
                source: None,
            }),
        }
    }
}
