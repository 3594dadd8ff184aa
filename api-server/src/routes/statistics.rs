//! Statistics endpoint

use axum::{extract::State, routing::get, Json, Router};

use todo_core::task::{active_and_completed_stats, StatsResult};

use super::{error_response, ApiError};
use crate::state::AppState;

/// GET /api/statistics - Active and completed percentages
async fn get_statistics(State(state): State<AppState>) -> Result<Json<StatsResult>, ApiError> {
    let tasks = state
        .repository()
        .get_tasks(false)
        .await
        .map_err(error_response)?;

    Ok(Json(active_and_completed_stats(&tasks)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/statistics", get(get_statistics))
}
