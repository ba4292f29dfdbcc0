//! Risk model: factor weighting table, category thresholds, and validation
//! of untrusted provider output.

use crate::errors::AppError;
use crate::models::scan::{AnalysisResult, RawAnalysis, ThreatLevel};

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Factor weights for the composite risk score.
///
/// The provider is instructed to apply these when scoring; they are kept
/// here as the single source of truth for the prompt and for documentation
/// of what the breakdown sub-scores mean.
#[derive(Debug, Clone)]
pub struct RiskWeights {
    pub blacklist: f64,
    pub domain_age: f64,
    pub ssl_validity: f64,
    pub redirect_chain: f64,
    pub ip_reputation: f64,
    pub phishing_indicators: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            blacklist: 0.30,
            domain_age: 0.15,
            ssl_validity: 0.10,
            redirect_chain: 0.10,
            ip_reputation: 0.15,
            phishing_indicators: 0.20,
        }
    }
}

/// Map a risk score to its threat category.
///
/// Fixed threshold table: 0-30 Safe, 31-70 Suspicious, 71-100 Malicious.
pub fn threat_level_for(score: i64) -> ThreatLevel {
    match score {
        s if s <= 30 => ThreatLevel::Safe,
        s if s <= 70 => ThreatLevel::Suspicious,
        _ => ThreatLevel::Malicious,
    }
}

/// Validate an untrusted provider payload into an `AnalysisResult`.
///
/// A missing `risk_score` is a processing error, never a silently-zeroed
/// score. The score is clamped to [0, 100] and the threat level is always
/// recomputed from it; the provider's own label is logged when it disagrees
/// but never stored.
pub fn evaluate(raw: RawAnalysis) -> Result<AnalysisResult, AppError> {
    let score = raw
        .risk_score
        .ok_or_else(|| AppError::Provider("analysis payload is missing risk_score".to_string()))?;
    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    let level = threat_level_for(score);

    if let Some(reported) = raw.threat_level.as_deref() {
        if !reported.eq_ignore_ascii_case(&level.to_string()) {
            tracing::warn!(
                reported,
                derived = %level,
                score,
                "provider threat level disagrees with derived category"
            );
        }
    }

    Ok(AnalysisResult {
        risk_score: score,
        threat_level: level,
        breakdown: raw.breakdown,
        checks: raw.checks,
        recommendations: raw.recommendations,
        summary: raw.summary,
    })
}
