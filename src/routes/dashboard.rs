//! Dashboard route: aggregated statistics for the overview page.

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::services::dashboard::{self, DashboardStats};
use crate::AppState;

/// GET /api/dashboard-stats — aggregated dashboard statistics.
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = dashboard::get_stats(&state.db).await?;
    Ok(Json(stats))
}
