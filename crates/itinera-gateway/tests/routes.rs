// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route-level tests for the gateway, driven in-process through the router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request, StatusCode};
use itinera_core::{ItineraryStore, NewItinerary};
use itinera_gateway::{build_router, GatewayState};
use itinera_test_utils::{
    completion_json, FailingItineraryStore, MockCompletionProvider, MockReply, TestHarness,
};
use tower::ServiceExt;

async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = send(router, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ---- POST /api/generate ----

#[tokio::test]
async fn generate_relays_upstream_json_verbatim() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Day 1: Colosseum".to_string()])
        .build()
        .await
        .unwrap();

    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/generate",
        Some(r#"{"message": "Plan a vacation to Rome"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, completion_json("Day 1: Colosseum"));
    assert_eq!(harness.provider.received().await, vec!["Plan a vacation to Rome"]);
}

#[tokio::test]
async fn generate_serves_replies_queued_after_startup() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .provider
        .push_reply(MockReply::Content("Day 1: Alfama".into()))
        .await;

    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/generate",
        Some(r#"{"message": "Lisbon trip"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, completion_json("Day 1: Alfama"));
}

#[tokio::test]
async fn generate_does_not_apply_keyword_gate() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, _) = send_json(
        harness.router(),
        Method::POST,
        "/api/generate",
        Some(r#"{"message": "write me a poem"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.provider.received().await, vec!["write me a poem"]);
}

#[tokio::test]
async fn generate_passes_unusual_upstream_shapes_through() {
    let odd = serde_json::json!({"anything": [1, 2, 3]});
    let harness = TestHarness::builder()
        .with_mock_replies(vec![MockReply::Raw(odd.clone())])
        .build()
        .await
        .unwrap();
    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/generate",
        Some(r#"{"message": "trip"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, odd);
}

#[tokio::test]
async fn generate_failure_is_500_with_message() {
    let harness = TestHarness::builder()
        .with_mock_replies(vec![MockReply::Fail(
            "Failed to get response from OpenAI".into(),
        )])
        .build()
        .await
        .unwrap();

    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/generate",
        Some(r#"{"message": "trip to Oslo"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"error": "Failed to get response from OpenAI"}));
}

#[tokio::test]
async fn generate_rejects_malformed_body_with_json_envelope() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) =
        send_json(harness.router(), Method::POST, "/api/generate", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert!(harness.provider.received().await.is_empty());
}

// ---- POST /api/itineraries ----

#[tokio::test]
async fn create_returns_201_with_generated_record() {
    let harness = TestHarness::builder().build().await.unwrap();
    let before = chrono::Utc::now() - chrono::Duration::seconds(1);

    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/itineraries",
        Some(r#"{"prompt": "Paris trip", "itinerary": "Day 1..."}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert!(!data["_id"].as_str().unwrap().is_empty());
    assert_eq!(data["prompt"], "Paris trip");
    assert_eq!(data["itinerary"], "Day 1...");
    assert_eq!(data["isFavorite"], false);

    let created: chrono::DateTime<chrono::Utc> =
        data["createdDate"].as_str().unwrap().parse().unwrap();
    assert!(created >= before);
    assert!(created <= chrono::Utc::now());
}

#[tokio::test]
async fn create_missing_itinerary_is_400() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/itineraries",
        Some(r#"{"prompt": "x"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({"error": "Missing itinerary data"}));
    assert!(harness.storage.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_empty_prompt_is_400() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/itineraries",
        Some(r#"{"prompt": "", "itinerary": "Day 1"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing itinerary data");
}

#[tokio::test]
async fn create_honors_supplied_date_and_favorite() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/itineraries",
        Some(
            r#"{"prompt": "Oslo trip", "itinerary": "Day 1", "createdDate": "2025-06-01T12:00:00.000Z", "isFavorite": true}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["createdDate"], "2025-06-01T12:00:00.000Z");
    assert_eq!(json["data"]["isFavorite"], true);
}

// ---- POST /api/save (older route) ----

#[tokio::test]
async fn legacy_save_missing_data_is_plain_text() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, body) = send(
        harness.router(),
        Method::POST,
        "/api/save",
        Some(r#"{"itinerary": "Day 1"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "Missing itinerary data");
}

#[tokio::test]
async fn legacy_save_creates_record() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(
        harness.router(),
        Method::POST,
        "/api/save",
        Some(r#"{"prompt": "Rome trip", "itinerary": "Day 1"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(harness.storage.list().await.unwrap().len(), 1);
}

// ---- GET /api/history ----

#[tokio::test]
async fn history_lists_newest_first() {
    let harness = TestHarness::builder().build().await.unwrap();
    let a = harness
        .storage
        .create(NewItinerary::new("A trip", "a"))
        .await
        .unwrap();
    let b = harness
        .storage
        .create(NewItinerary::new("B trip", "b"))
        .await
        .unwrap();

    let (status, json) = send_json(harness.router(), Method::GET, "/api/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);
}

#[tokio::test]
async fn history_is_empty_array_when_nothing_saved() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(harness.router(), Method::GET, "/api/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

// ---- PUT /api/itineraries/{id}/favorite ----

#[tokio::test]
async fn favorite_toggle_updates_record_and_history() {
    let harness = TestHarness::builder().build().await.unwrap();
    let record = harness
        .storage
        .create(NewItinerary::new("Paris trip", "Day 1"))
        .await
        .unwrap();

    let (status, json) = send_json(
        harness.router(),
        Method::PUT,
        &format!("/api/itineraries/{}/favorite", record.id),
        Some(r#"{"isFavorite": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["_id"], record.id.as_str());
    assert_eq!(json["data"]["isFavorite"], true);

    let (_, history) = send_json(harness.router(), Method::GET, "/api/history", None).await;
    assert_eq!(history[0]["isFavorite"], true);
}

#[tokio::test]
async fn favorite_unknown_id_is_404() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(
        harness.router(),
        Method::PUT,
        "/api/itineraries/does-not-exist/favorite",
        Some(r#"{"isFavorite": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({"error": "Itinerary not found"}));
}

#[tokio::test]
async fn favorite_non_boolean_is_400() {
    let harness = TestHarness::builder().build().await.unwrap();
    let record = harness
        .storage
        .create(NewItinerary::new("Paris trip", "Day 1"))
        .await
        .unwrap();

    for body in [r#"{"isFavorite": "yes"}"#, r#"{"isFavorite": 1}"#, "{}"] {
        let (status, json) = send_json(
            harness.router(),
            Method::PUT,
            &format!("/api/itineraries/{}/favorite", record.id),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["error"], "isFavorite must be boolean");
    }

    let stored = harness.storage.list().await.unwrap();
    assert!(!stored[0].is_favorite);
}

// ---- store failures ----

fn failing_store_router() -> Router {
    build_router(GatewayState::new(
        Arc::new(MockCompletionProvider::new()),
        Arc::new(FailingItineraryStore::new("database is locked")),
    ))
}

#[tokio::test]
async fn history_store_failure_is_500_with_message() {
    let (status, json) =
        send_json(failing_store_router(), Method::GET, "/api/history", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"error": "database is locked"}));
}

#[tokio::test]
async fn create_store_failure_is_500_with_message() {
    for uri in ["/api/itineraries", "/api/save"] {
        let (status, json) = send_json(
            failing_store_router(),
            Method::POST,
            uri,
            Some(r#"{"prompt": "Paris trip", "itinerary": "Day 1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri: {uri}");
        assert_eq!(json, serde_json::json!({"error": "database is locked"}));
    }
}

#[tokio::test]
async fn favorite_store_failure_is_500_with_message() {
    let (status, json) = send_json(
        failing_store_router(),
        Method::PUT,
        "/api/itineraries/some-id/favorite",
        Some(r#"{"isFavorite": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"error": "database is locked"}));
}

#[tokio::test]
async fn health_is_degraded_when_store_is_down() {
    let (status, json) = send_json(failing_store_router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
}

// ---- misc ----

#[tokio::test]
async fn health_reports_adapters() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(harness.router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    let names: Vec<&str> = json["adapters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["mock-provider", "sqlite"]);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let harness = TestHarness::builder().build().await.unwrap();
    let (status, json) = send_json(harness.router(), Method::GET, "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}
