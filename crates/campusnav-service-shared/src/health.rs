//! Health check handlers for Kubernetes probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of locations in the served snapshot (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_loaded: Option<usize>,

    /// Generation of the served snapshot (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_generation: Option<u64>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            locations_loaded: None,
            snapshot_generation: None,
        }
    }

    pub fn ready(service: &str, version: &str, locations: usize, generation: u64) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            locations_loaded: Some(locations),
            snapshot_generation: Some(generation),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            locations_loaded: None,
            snapshot_generation: None,
        }
    }
}

/// Liveness probe handler. Always 200 while the process is serving.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 503 while the served snapshot has no locations, since every route
/// query would fail.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"campusnav-service-shared","version":"0.1.0","locations_loaded":10,"snapshot_generation":0}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let snapshot = state.snapshot();
    let locations = snapshot.campus().locations.len();

    if locations == 0 {
        let status = HealthStatus::not_ready(service, version, "no locations loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, locations, snapshot.generation());
    (StatusCode::OK, Json(status)).into_response()
}
