//! User model. Authentication lives in an external identity provider;
//! this row only anchors `user_id` references from scans and alert rules.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Full user row from the database (includes password_hash — never
/// serialize to the API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
