//! Home dashboard and control panel routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use domain::models::{ChartPeriod, ControlSettings, HomeView};
use domain::services::build_home_view;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::{ControlError, ControlUpdate};

/// Query parameters shared by the home and reports pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub device_id: Option<String>,
    pub period: Option<String>,
}

impl ViewQuery {
    pub fn period(&self) -> Result<ChartPeriod, ApiError> {
        match self.period.as_deref() {
            None | Some("") => Ok(ChartPeriod::default()),
            Some(raw) => ChartPeriod::from_str(raw)
                .map_err(|_| ApiError::Validation("invalidPeriod".to_string())),
        }
    }
}

/// Response for a manual watering run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WateringResponse {
    pub water_amount: u8,
}

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/home")
}

/// GET /home?deviceId=<id>&period=<daily|weekly|monthly>
pub async fn home_page(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<HomeView>, ApiError> {
    let period = query.period()?;
    let devices = state.devices.devices();
    let view = build_home_view(
        &devices,
        query.device_id.as_deref(),
        period,
        state.controls.settings(),
        &mut rand::thread_rng(),
    );
    Ok(Json(view))
}

/// GET /home/controls
pub async fn get_controls(State(state): State<AppState>) -> Json<ControlSettings> {
    Json(state.controls.settings())
}

/// PUT /home/controls
pub async fn update_controls(
    State(state): State<AppState>,
    Json(update): Json<ControlUpdate>,
) -> Json<ControlSettings> {
    Json(state.controls.update(&update))
}

/// POST /home/controls/water
pub async fn water_now(State(state): State<AppState>) -> Result<Json<WateringResponse>, ApiError> {
    let water_amount = state.controls.water_now().map_err(|e| match e {
        ControlError::AutoWateringActive => ApiError::Conflict("autoWateringActive".to_string()),
    })?;
    Ok(Json(WateringResponse { water_amount }))
}

/// POST /home/controls/fan
pub async fn apply_fan_settings(State(state): State<AppState>) -> Json<ControlSettings> {
    Json(state.controls.apply_fan_settings())
}
