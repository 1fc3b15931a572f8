// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completion provider.
//!
//! Implements [`CompletionProvider`] by relaying a single user message to the
//! chat-completions endpoint and handing back the response JSON untouched.

pub mod client;
pub mod types;

use async_trait::async_trait;
use itinera_config::model::OpenAiConfig;
use itinera_core::error::ItineraError;
use itinera_core::traits::{CompletionProvider, PluginAdapter};
use itinera_core::types::{AdapterType, HealthStatus};
use tracing::{debug, info};

use crate::client::OpenAiClient;

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`CompletionProvider`].
///
/// API key resolution order: config, then `OPENAI_API_KEY`, then error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ItineraError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenAiClient::new(&api_key, config.model.clone(), config.endpoint.clone())?;

        info!(model = %config.model, endpoint = %config.endpoint, "OpenAI provider initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ItineraError> {
        // Never contacts the upstream.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ItineraError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, message: &str) -> Result<serde_json::Value, ItineraError> {
        debug!(chars = message.len(), "forwarding completion request");
        self.client.complete(message).await
    }
}

fn resolve_api_key(config_key: &Option<String>) -> Result<String, ItineraError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            ItineraError::Config(format!(
                "OpenAI API key not found. Set openai.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
