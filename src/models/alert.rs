//! Alert rule model: a per-user rule type plus threshold. Rules are
//! stored here but evaluated outside the scan pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AlertRule {
    pub id: i64,
    pub user_id: Option<i64>,
    pub rule_type: String,
    pub threshold: i64,
    pub created_at: DateTime<Utc>,
}
