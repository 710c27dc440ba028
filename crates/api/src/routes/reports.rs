//! Reports page route.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::ReportView;
use domain::services::build_report_view;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::home::ViewQuery;

/// GET /reports?deviceId=<id>&period=<daily|weekly|monthly>
pub async fn reports_page(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ReportView>, ApiError> {
    let period = query.period()?;
    let devices = state.devices.devices();
    let view = build_report_view(
        &devices,
        query.device_id.as_deref(),
        period,
        &mut rand::thread_rng(),
    );
    Ok(Json(view))
}
