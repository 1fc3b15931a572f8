// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles POST /api/generate, GET /api/history, POST /api/itineraries,
//! PUT /api/itineraries/{id}/favorite, POST /api/save, and GET /health.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use itinera_core::types::timestamp;
use itinera_core::{AdapterType, HealthStatus, Itinerary, ItineraError, NewItinerary};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::server::GatewayState;

pub const MISSING_ITINERARY_DATA: &str = "Missing itinerary data";
pub const ITINERARY_NOT_FOUND: &str = "Itinerary not found";
pub const FAVORITE_NOT_BOOLEAN: &str = "isFavorite must be boolean";

/// Request body for POST /api/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub message: String,
}

/// Request body for POST /api/itineraries and POST /api/save.
///
/// The required fields are optional here so that their absence can be
/// reported with the dedicated message instead of a serde error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItineraryRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub itinerary: Option<String>,
    #[serde(rename = "createdDate", default, with = "timestamp::option")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: Option<bool>,
}

impl CreateItineraryRequest {
    /// Both text fields present and non-empty, or `None`.
    fn into_new_itinerary(self) -> Option<NewItinerary> {
        let prompt = self.prompt.filter(|p| !p.is_empty())?;
        let itinerary = self.itinerary.filter(|i| !i.is_empty())?;
        Some(NewItinerary {
            prompt,
            itinerary,
            created_date: self.created_date,
            is_favorite: self.is_favorite,
        })
    }
}

/// Body of every successful create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub adapters: Vec<AdapterHealth>,
}

/// Health of one backing adapter.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdapterHealth {
    pub name: String,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub status: String,
}

/// POST /api/generate
///
/// Forwards `message` to the completion provider and relays its JSON as-is.
pub async fn post_generate(
    State(state): State<GatewayState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = payload?;
    match state.provider.complete(&body.message).await {
        Ok(completion) => Ok(Json(completion)),
        Err(e) => {
            error!(error = %e, "completion failed");
            Err(e.into())
        }
    }
}

/// GET /api/history
pub async fn get_history(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Itinerary>>, ApiError> {
    match state.store.list().await {
        Ok(records) => {
            debug!(count = records.len(), "history listed");
            Ok(Json(records))
        }
        Err(e) => {
            error!(error = %e, "history listing failed");
            Err(e.into())
        }
    }
}

/// POST /api/itineraries
pub async fn post_itinerary(
    State(state): State<GatewayState>,
    payload: Result<Json<CreateItineraryRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let new = body
        .into_new_itinerary()
        .ok_or_else(|| ApiError::BadRequest(MISSING_ITINERARY_DATA.to_string()))?;
    create(&state, new).await
}

/// POST /api/save
///
/// Older save route. Same as [`post_itinerary`] except that missing fields
/// are reported as a plain-text body.
pub async fn post_save(
    State(state): State<GatewayState>,
    payload: Result<Json<CreateItineraryRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    match body.into_new_itinerary() {
        Some(new) => create(&state, new).await,
        None => Ok((StatusCode::BAD_REQUEST, MISSING_ITINERARY_DATA).into_response()),
    }
}

async fn create(state: &GatewayState, new: NewItinerary) -> Result<Response, ApiError> {
    match state.store.create(new).await {
        Ok(record) => {
            info!(id = %record.id, "itinerary saved");
            Ok((StatusCode::CREATED, Json(SuccessResponse::new(record))).into_response())
        }
        Err(e) => {
            error!(error = %e, "itinerary save failed");
            Err(e.into())
        }
    }
}

/// PUT /api/itineraries/{id}/favorite
///
/// The body is read as untyped JSON so that only a real boolean passes.
pub async fn put_favorite(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SuccessResponse<Itinerary>>, ApiError> {
    let Json(body) = payload?;
    let is_favorite = body
        .get("isFavorite")
        .and_then(serde_json::Value::as_bool)
        .ok_or_else(|| ApiError::BadRequest(FAVORITE_NOT_BOOLEAN.to_string()))?;

    match state.store.set_favorite(&id, is_favorite).await {
        Ok(Some(record)) => Ok(Json(SuccessResponse::new(record))),
        Ok(None) => {
            warn!(id = %id, "favorite toggle on unknown itinerary");
            Err(ApiError::NotFound(ITINERARY_NOT_FOUND.to_string()))
        }
        Err(e) => {
            error!(error = %e, id = %id, "favorite toggle failed");
            Err(e.into())
        }
    }
}

/// GET /health
///
/// `ok` when every adapter reports healthy, `degraded` otherwise.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let reports = vec![
        adapter_health(
            state.provider.name(),
            state.provider.adapter_type(),
            state.provider.health_check().await,
        ),
        adapter_health(
            state.store.name(),
            state.store.adapter_type(),
            state.store.health_check().await,
        ),
    ];

    let all_healthy = reports.iter().all(|r| r.status == "healthy");
    Json(HealthResponse {
        status: if all_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        adapters: reports,
    })
}

fn adapter_health(
    name: &str,
    adapter_type: AdapterType,
    result: Result<HealthStatus, ItineraError>,
) -> AdapterHealth {
    let status = match result {
        Ok(HealthStatus::Healthy) => "healthy".to_string(),
        Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {}", e.description()),
    };
    AdapterHealth {
        name: name.to_string(),
        adapter_type: adapter_type.to_string(),
        status,
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}
