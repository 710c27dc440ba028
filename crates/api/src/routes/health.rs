//! Health check endpoint handler.

use axum::{extract::State, Json};
use persistence::repositories::USERS_KEY;
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: StorageHealth,
    pub devices: usize,
}

/// Key-value store health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageHealth {
    pub backend: String,
    pub readable: bool,
}

/// GET /api/health
///
/// Reports "degraded" when the registered user list cannot be read.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let readable = match state.session.is_email_registered("") {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(key = USERS_KEY, error = %e, "Health check could not read user list");
            false
        }
    };

    Json(HealthResponse {
        status: if readable { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: StorageHealth {
            backend: state.config.storage.backend.clone(),
            readable,
        },
        devices: state.devices.len(),
    })
}
