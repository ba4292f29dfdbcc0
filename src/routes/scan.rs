//! Scan route: submit a URL for analysis.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::models::scan::ScanResponse;
use crate::services::scan::{self, ScanRequest};
use crate::AppState;

/// POST /api/scan — validate, analyze, score, and persist a URL scan.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ScanRequest>,
) -> Result<(StatusCode, Json<ScanResponse>), AppError> {
    let response = scan::perform_scan(&state, body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
