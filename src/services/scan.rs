//! Scan orchestration: validate, analyze, score, persist.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::scan::{NewScan, ScanResponse};
use crate::services::{risk, scan_store, url_validator};
use crate::AppState;

/// Request body for `POST /api/scan`. `url` is optional at the type level
/// so its absence surfaces as a validation error rather than a
/// deserialization fault.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub url: Option<String>,
    pub user_id: Option<i64>,
}

/// Run one scan end to end. Persistence is all-or-nothing: nothing is
/// written unless the provider payload validated into a full analysis.
pub async fn perform_scan(
    state: &AppState,
    request: ScanRequest,
) -> Result<ScanResponse, AppError> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("url is required".to_string()))?;
    url_validator::validate(url)?;

    tracing::debug!(url, provider = state.analyzer.name(), "starting scan");

    // The provider round trip holds no store handle; the pool is only
    // touched once a validated analysis exists.
    let raw = state.analyzer.analyze(url).await?;
    let analysis = risk::evaluate(raw)?;

    let record = scan_store::insert(
        &state.db,
        NewScan {
            user_id: request.user_id,
            url: url.to_string(),
            analysis,
        },
    )
    .await?;

    tracing::info!(
        id = record.id,
        url = %record.url,
        risk_score = record.risk_score,
        threat_level = %record.threat_level,
        "scan persisted"
    );

    Ok(ScanResponse {
        id: record.id,
        analysis: record.analysis.0,
    })
}
