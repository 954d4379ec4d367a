//! Reading Routes
//!
//! Each handler takes the current snapshot and projects one view from it.
//! Before the first tick every view answers with empty or null values.
//!
//! - GET /api/v1/snapshot - Whole window plus latest reading
//! - GET /api/v1/dashboard - Every derived view at once
//! - GET /api/v1/latest - Latest temperature for both locations
//! - GET /api/v1/latest/:location - Latest temperature for one location
//! - GET /api/v1/comparison - Which location is warmer
//! - GET /api/v1/table - Window as rows
//! - GET /api/v1/chart - Chart series, null while empty

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    ComparisonResponse, LatestResponse, LocationLatestResponse, SnapshotResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::sampler::{Location, Reading};
use crate::views::{self, ChartSeries, DashboardView, Table};

/// GET /api/v1/snapshot
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> Json<SnapshotResponse> {
    Json(SnapshotResponse::from(state.snapshot().as_ref()))
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(DashboardView::from_snapshot(&state.snapshot()))
}

/// GET /api/v1/latest
pub async fn get_latest(State(state): State<Arc<AppState>>) -> Json<LatestResponse> {
    Json(LatestResponse::from(state.snapshot().as_ref()))
}

/// GET /api/v1/latest/:location
///
/// Accepts `arctic`/`north` or `antarctic`/`south`.
pub async fn get_location_latest(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
) -> ApiResult<Json<LocationLatestResponse>> {
    let location: Location = location.parse().map_err(ApiError::Validation)?;
    let snapshot = state.snapshot();
    let latest = snapshot.latest();

    Ok(Json(LocationLatestResponse {
        location,
        timestamp: latest.map(Reading::timestamp_label),
        temperature: latest.map(|r| r.temperature(location)),
        text: views::latest_temperature(&snapshot, location),
    }))
}

/// GET /api/v1/comparison
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
) -> Json<Option<ComparisonResponse>> {
    let comparison = views::compare(&state.snapshot());
    Json(comparison.as_ref().map(ComparisonResponse::from))
}

/// GET /api/v1/table
pub async fn get_table(State(state): State<Arc<AppState>>) -> Json<Table> {
    Json(views::table(&state.snapshot()))
}

/// GET /api/v1/chart
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<Option<ChartSeries>> {
    Json(views::chart(&state.snapshot()))
}
