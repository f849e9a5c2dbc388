use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, AppState};
use crate::components::insight::{snapshots, summarize_or_fallback};
use crate::components::roster::models::{OccupancyBlock, TrainingCenter};
use crate::components::roster::schedule::MetaUpdate;
use crate::components::roster::stats::{DashboardStats, MonthlyOccupancy};
use crate::components::roster::RosterUpdate;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Body of a schedule booking.
///
/// The range end is either given directly or as a duration in months
/// counted from `start_month`; without either the booking covers one month.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub start_month: usize,
    pub end_month: Option<usize>,
    pub duration: Option<usize>,
    pub tenant: String,
}

impl AssignRequest {
    fn resolved_end(&self) -> usize {
        match (self.end_month, self.duration) {
            (Some(end), _) => end,
            (None, Some(duration)) => self.start_month.saturating_add(duration.max(1) - 1),
            (None, None) => self.start_month,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub start_month: usize,
    pub end_month: usize,
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    pub maintenance: bool,
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub text: String,
}

// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}

pub async fn list_centers_handler(State(state): State<AppState>) -> ApiResult<Vec<TrainingCenter>> {
    Ok(Json(state.roster.list_centers().await?))
}

pub async fn get_center_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TrainingCenter> {
    Ok(Json(state.roster.get_center(id).await?))
}

pub async fn get_blocks_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<OccupancyBlock>> {
    Ok(Json(state.roster.get_blocks(id).await?))
}

pub async fn assign_schedule_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AssignRequest>,
) -> ApiResult<TrainingCenter> {
    let end_month = request.resolved_end();
    info!(
        "Booking {} for {} from month {} to {}",
        id, request.tenant, request.start_month, end_month
    );

    let center = state
        .roster
        .assign_tenant(id, request.start_month, end_month, request.tenant)
        .await?;
    Ok(Json(center))
}

pub async fn clear_schedule_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RangeRequest>,
) -> ApiResult<TrainingCenter> {
    let center = state
        .roster
        .clear_schedule(id, request.start_month, request.end_month)
        .await?;
    Ok(Json(center))
}

pub async fn clear_block_handler(
    State(state): State<AppState>,
    Path((id, month)): Path<(String, usize)>,
) -> ApiResult<TrainingCenter> {
    Ok(Json(state.roster.clear_block(id, month).await?))
}

pub async fn edit_meta_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<MetaUpdate>,
) -> ApiResult<TrainingCenter> {
    Ok(Json(state.roster.edit_meta(id, fields).await?))
}

pub async fn set_maintenance_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MaintenanceRequest>,
) -> ApiResult<TrainingCenter> {
    let center = state
        .roster
        .set_maintenance(id, request.maintenance)
        .await?;
    Ok(Json(center))
}

/// Apply a tagged update message
pub async fn dispatch_handler(
    State(state): State<AppState>,
    Json(update): Json<RosterUpdate>,
) -> ApiResult<TrainingCenter> {
    Ok(Json(state.roster.apply(update).await?))
}

pub async fn stats_handler(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    Ok(Json(state.roster.stats().await?))
}

pub async fn trend_handler(State(state): State<AppState>) -> ApiResult<Vec<MonthlyOccupancy>> {
    Ok(Json(state.roster.trend().await?))
}

/// Ask the summarizer about the current roster; failures become the fallback text
pub async fn insight_handler(State(state): State<AppState>) -> ApiResult<InsightResponse> {
    let centers = state.roster.list_centers().await?;
    let text = summarize_or_fallback(state.summarizer.as_ref(), &snapshots(&centers)).await;
    Ok(Json(InsightResponse { text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(end_month: Option<usize>, duration: Option<usize>) -> AssignRequest {
        AssignRequest {
            start_month: 3,
            end_month,
            duration,
            tenant: "Camp".to_string(),
        }
    }

    #[test]
    fn test_resolved_end() {
        assert_eq!(request(None, None).resolved_end(), 3);
        assert_eq!(request(Some(7), Some(2)).resolved_end(), 7);
        assert_eq!(request(None, Some(4)).resolved_end(), 6);
        assert_eq!(request(None, Some(0)).resolved_end(), 3);
    }
}
