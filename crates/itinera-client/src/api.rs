// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed HTTP client for the gateway's `/api` routes.
//!
//! Every call resolves to one of three cases:
//! - `Err(ItineraError::Transport)`: the server was unreachable or the body
//!   could not be read.
//! - `Ok(ApiOutcome::Success(T))`: a 2xx answer decoded as `T`.
//! - `Ok(ApiOutcome::Failure { .. })`: any other status, with the message
//!   taken from the `{"error": ...}` envelope.
//!
//! Success and failure are told apart by HTTP status alone.

use itinera_core::{ChatCompletion, Itinerary, ItineraError, NewItinerary};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tagged result of a call that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { status: u16, message: String },
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SuccessEnvelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct FavoriteBody {
    #[serde(rename = "isFavorite")]
    is_favorite: bool,
}

/// HTTP client bound to one gateway base URL.
#[derive(Debug, Clone)]
pub struct ItineraClient {
    client: reqwest::Client,
    base_url: String,
}

impl ItineraClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ItineraError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ItineraError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/generate
    pub async fn generate(&self, message: &str) -> Result<ApiOutcome<ChatCompletion>, ItineraError> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&GenerateBody { message })
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    /// GET /api/history
    pub async fn history(&self) -> Result<ApiOutcome<Vec<Itinerary>>, ItineraError> {
        let response = self
            .client
            .get(self.url("/api/history"))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    /// POST /api/itineraries
    pub async fn create_itinerary(
        &self,
        new: &NewItinerary,
    ) -> Result<ApiOutcome<Itinerary>, ItineraError> {
        let response = self
            .client
            .post(self.url("/api/itineraries"))
            .json(new)
            .send()
            .await
            .map_err(transport)?;
        Ok(unwrap_data(decode::<SuccessEnvelope<Itinerary>>(response).await?))
    }

    /// PUT /api/itineraries/{id}/favorite
    pub async fn set_favorite(
        &self,
        id: &str,
        is_favorite: bool,
    ) -> Result<ApiOutcome<Itinerary>, ItineraError> {
        let response = self
            .client
            .put(self.favorite_url(id)?)
            .json(&FavoriteBody { is_favorite })
            .send()
            .await
            .map_err(transport)?;
        Ok(unwrap_data(decode::<SuccessEnvelope<Itinerary>>(response).await?))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `id` is percent-encoded as a single path segment.
    fn favorite_url(&self, id: &str) -> Result<Url, ItineraError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ItineraError::Transport {
            message: format!("invalid server url {}: {e}", self.base_url),
            source: Some(Box::new(e)),
        })?;
        url.path_segments_mut()
            .map_err(|()| ItineraError::Transport {
                message: format!("server url {} cannot take a path", self.base_url),
                source: None,
            })?
            .pop_if_empty()
            .extend(["api", "itineraries", id, "favorite"]);
        Ok(url)
    }
}

fn transport(e: reqwest::Error) -> ItineraError {
    ItineraError::Transport {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

fn unwrap_data<T>(outcome: ApiOutcome<SuccessEnvelope<T>>) -> ApiOutcome<T> {
    match outcome {
        ApiOutcome::Success(envelope) => ApiOutcome::Success(envelope.data),
        ApiOutcome::Failure { status, message } => ApiOutcome::Failure { status, message },
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<ApiOutcome<T>, ItineraError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    debug!(status = %status, bytes = body.len(), "gateway response received");

    if status.is_success() {
        let data = serde_json::from_str(&body).map_err(|e| ItineraError::Transport {
            message: format!("unexpected response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        return Ok(ApiOutcome::Success(data));
    }

    let message = failure_message(status, &body);
    warn!(status = %status, message = %message, "gateway request failed");
    Ok(ApiOutcome::Failure {
        status: status.as_u16(),
        message,
    })
}

/// Envelope message, else the raw body, else the status reason.
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record_json(id: &str, favorite: bool) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "prompt": "Paris trip",
            "itinerary": "Day 1",
            "createdDate": "2026-03-01T10:00:00.000Z",
            "isFavorite": favorite,
        })
    }

    #[tokio::test]
    async fn generate_decodes_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(serde_json::json!({"message": "Rome vacation"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Day 1: Forum"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ItineraClient::new(server.uri()).unwrap();
        let outcome = client.generate("Rome vacation").await.unwrap();
        match outcome {
            ApiOutcome::Success(completion) => {
                assert_eq!(completion.first_content(), Some("Day 1: Forum"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_envelope_becomes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_json(
                serde_json::json!({"error": "Failed to get response from OpenAI"}),
            ))
            .mount(&server)
            .await;

        let client = ItineraClient::new(server.uri()).unwrap();
        let outcome = client.generate("trip").await.unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                status: 500,
                message: "Failed to get response from OpenAI".into()
            }
        );
    }

    #[tokio::test]
    async fn plain_text_failure_uses_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/itineraries"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Missing itinerary data"))
            .mount(&server)
            .await;

        let client = ItineraClient::new(server.uri()).unwrap();
        let outcome = client
            .create_itinerary(&NewItinerary::new("x", "y"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                status: 400,
                message: "Missing itinerary data".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_failure_body_uses_status_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ItineraClient::new(server.uri()).unwrap();
        let outcome = client.history().await.unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                status: 503,
                message: "Service Unavailable".into()
            }
        );
    }

    #[tokio::test]
    async fn success_with_error_key_is_still_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"error": "looks like an error", "choices": []}),
            ))
            .mount(&server)
            .await;

        let client = ItineraClient::new(server.uri()).unwrap();
        let outcome = client.generate("trip").await.unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn create_sends_record_and_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/itineraries"))
            .and(body_json(serde_json::json!({"prompt": "Paris trip", "itinerary": "Day 1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "success": true,
                "data": record_json("abc", false),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ItineraClient::new(format!("{}/", server.uri())).unwrap();
        let outcome = client
            .create_itinerary(&NewItinerary::new("Paris trip", "Day 1"))
            .await
            .unwrap();
        match outcome {
            ApiOutcome::Success(record) => {
                assert_eq!(record.id, "abc");
                assert!(!record.is_favorite);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_favorite_puts_boolean() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/itineraries/abc/favorite"))
            .and(body_json(serde_json::json!({"isFavorite": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": record_json("abc", true),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ItineraClient::new(server.uri()).unwrap();
        let outcome = client.set_favorite("abc", true).await.unwrap();
        assert!(matches!(outcome, ApiOutcome::Success(ref r) if r.is_favorite));
    }

    #[tokio::test]
    async fn set_favorite_encodes_id_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/itineraries/a%20b%2Fc%3Fd/favorite"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": record_json("a b/c?d", false),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ItineraClient::new(format!("{}/", server.uri())).unwrap();
        let outcome = client.set_favorite("a b/c?d", false).await.unwrap();
        assert!(matches!(outcome, ApiOutcome::Success(ref r) if r.id == "a b/c?d"));
    }

    #[test]
    fn favorite_url_keeps_base_path_prefix() {
        let client = ItineraClient::new("http://127.0.0.1:3000/itinera/").unwrap();
        let url = client.favorite_url("abc").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/itinera/api/itineraries/abc/favorite");

        let client = ItineraClient::new("not a url").unwrap();
        assert!(matches!(client.favorite_url("abc"), Err(ItineraError::Transport { .. })));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ItineraClient::new(format!("http://{addr}")).unwrap();
        let err = client.history().await.unwrap_err();
        assert!(matches!(err, ItineraError::Transport { .. }));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ItineraClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
        assert_eq!(client.url("/api/history"), "http://127.0.0.1:3000/api/history");
    }
}
