use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::batch::{self, BatchItem};
use crate::carriers::{self, Carrier};
use crate::errors::AppError;
use crate::models::tracking::TrackingResult;
use crate::AppState;

// ── Request / Response DTOs ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default)]
    pub carrier_id: String,
    #[serde(default)]
    pub tracking_number: String,
}

#[derive(Serialize)]
pub struct CarriersResponse {
    pub carriers: Vec<Carrier>,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub items: Vec<BatchItem>,
}

// ── Handlers ─────────────────────────────────────────────────

/// POST /track — look up a single tracking record.
pub async fn track(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrackRequest>,
) -> Result<Json<TrackingResult>, AppError> {
    let result = state
        .tracker
        .track(&payload.carrier_id, &payload.tracking_number)
        .await?;
    Ok(Json(result))
}

/// POST /track/batch — run a CSV batch. Always responds 200; each item
/// carries its own success/error status, so one bad row never fails the
/// whole request.
pub async fn track_batch(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Json<BatchResponse> {
    let items = batch::run(&state.tracker, &body).await;
    Json(BatchResponse { items })
}

/// GET /carriers — the static list of supported carriers.
pub async fn list_carriers() -> Json<CarriersResponse> {
    Json(CarriersResponse {
        carriers: carriers::enabled().cloned().collect(),
    })
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
