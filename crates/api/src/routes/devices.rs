//! Device endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Device, NewDevice, TelemetryPatch};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for adding a device from the devices page.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "deviceNameRequired"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "arduinoIdRequired"))]
    pub arduino_id: String,
}

/// Request body for renaming a device.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "deviceNameRequired"))]
    pub name: String,
}

/// Response for device listing.
#[derive(Debug, Serialize)]
pub struct ListDevicesResponse {
    pub devices: Vec<Device>,
}

fn not_found(device_id: &str) -> ApiError {
    tracing::debug!(device_id = %device_id, "Device not found");
    ApiError::NotFound("deviceNotFound".to_string())
}

/// GET /devices
pub async fn list_devices(State(state): State<AppState>) -> Json<ListDevicesResponse> {
    Json(ListDevicesResponse {
        devices: state.devices.devices(),
    })
}

/// GET /devices/:device_id
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    state
        .devices
        .get(&device_id)
        .map(Json)
        .ok_or_else(|| not_found(&device_id))
}

/// Add an Arduino node with zeroed telemetry.
///
/// POST /devices
pub async fn add_device(
    State(state): State<AppState>,
    Json(request): Json<AddDeviceRequest>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    request.validate()?;

    let device = state
        .devices
        .add_device(NewDevice::arduino(request.name.trim(), request.arduino_id.trim()));
    Ok((StatusCode::CREATED, Json(device)))
}

/// DELETE /devices/:device_id
pub async fn delete_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .devices
        .delete_device(&device_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(&device_id))
}

/// PATCH /devices/:device_id/name
pub async fn rename_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<RenameDeviceRequest>,
) -> Result<Json<Device>, ApiError> {
    request.validate()?;

    state
        .devices
        .update_device_name(&device_id, request.name.trim())
        .map(Json)
        .ok_or_else(|| not_found(&device_id))
}

/// Flip a device between active and inactive.
///
/// POST /devices/:device_id/status
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    state
        .devices
        .update_device_status(&device_id)
        .map(Json)
        .ok_or_else(|| not_found(&device_id))
}

/// Merge a partial telemetry reading.
///
/// PATCH /devices/:device_id/data
pub async fn update_data(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(patch): Json<TelemetryPatch>,
) -> Result<Json<Device>, ApiError> {
    state
        .devices
        .update_device_data(&device_id, &patch)
        .map(Json)
        .ok_or_else(|| not_found(&device_id))
}
