//! Scan domain model: threat levels, provider analysis payloads, and
//! persisted scan records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Categorical verdict derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ThreatLevel {
    Safe,
    Suspicious,
    Malicious,
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Suspicious => write!(f, "Suspicious"),
            Self::Malicious => write!(f, "Malicious"),
        }
    }
}

/// Weighted sub-scores contributing to the risk score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakdown {
    pub blacklist: f64,
    pub domain_age: f64,
    pub ssl_validity: f64,
    pub redirect_chain: f64,
    pub ip_reputation: f64,
    pub phishing_indicators: f64,
}

/// Untrusted analysis payload as returned by the external provider.
///
/// Everything here is advisory until `services::risk::evaluate` has
/// validated it: `risk_score` may be absent or out of range, and the
/// reported `threat_level` is never taken on faith. Absent collections
/// deserialize to empty ones rather than failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    pub risk_score: Option<i64>,
    pub threat_level: Option<String>,
    #[serde(default)]
    pub breakdown: Breakdown,
    #[serde(default)]
    pub checks: BTreeMap<String, String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// Validated analysis: score clamped to [0, 100] and threat level
/// recomputed from it. Only `services::risk::evaluate` constructs this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_score: i64,
    pub threat_level: ThreatLevel,
    pub breakdown: Breakdown,
    pub checks: BTreeMap<String, String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

/// A persisted scan. Append-only: rows are never mutated after insert.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScanRecord {
    pub id: i64,
    pub user_id: Option<i64>,
    pub url: String,
    pub risk_score: i64,
    pub threat_level: ThreatLevel,
    pub analysis: Json<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}

/// A scan awaiting insertion; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewScan {
    pub user_id: Option<i64>,
    pub url: String,
    pub analysis: AnalysisResult,
}

/// Response body for `POST /api/scan`: the assigned id plus the full
/// analysis payload, flattened.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub id: i64,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}
