// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! One call is one round trip. There is no retry and no client-side timeout
//! beyond reqwest's defaults.

use itinera_core::ItineraError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::types::ChatCompletionRequest;

/// Error message surfaced when the upstream answers with a non-success status.
pub const UPSTREAM_FAILURE: &str = "Failed to get response from OpenAI";

/// HTTP client holding the bearer credential and the target endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: String, endpoint: String) -> Result<Self, ItineraError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ItineraError::Config(format!("invalid API key header value: {e}"))
        })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ItineraError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            endpoint,
        })
    }

    /// Sends `message` as a single user turn and returns the response body
    /// as untyped JSON.
    pub async fn complete(&self, message: &str) -> Result<serde_json::Value, ItineraError> {
        let request = ChatCompletionRequest::single_user_message(&self.model, message);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ItineraError::Provider {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "completion request rejected upstream");
            return Err(ItineraError::Provider {
                message: UPSTREAM_FAILURE.into(),
                source: None,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ItineraError::Provider {
                message: format!("failed to parse completion response: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
