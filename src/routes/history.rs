//! History route: recent scans with optional user scoping and search.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::scan::ScanRecord;
use crate::services::history;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub user_id: Option<i64>,
    pub q: Option<String>,
}

/// GET /api/history — the most recent scans, newest first, each with its
/// nested analysis payload.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<ScanRecord>>, AppError> {
    let records = history::search(&state.db, params.user_id, params.q.as_deref()).await?;
    Ok(Json(records))
}
