//! Append-only scan record store.
//!
//! All operations take the pool handle explicitly so callers (and tests)
//! control which database they hit. Ids are assigned by SQLite's
//! AUTOINCREMENT, which keeps them unique and monotonically increasing
//! under concurrent inserts; `created_at` is assigned here at insert time.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::scan::{NewScan, ScanRecord, ThreatLevel};

/// Durably persist a new scan and return the stored record.
pub async fn insert(pool: &SqlitePool, scan: NewScan) -> Result<ScanRecord, AppError> {
    let record = sqlx::query_as::<_, ScanRecord>(
        r#"
        INSERT INTO scans (user_id, url, risk_score, threat_level, analysis, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id, user_id, url, risk_score, threat_level, analysis, created_at
        "#,
    )
    .bind(scan.user_id)
    .bind(&scan.url)
    .bind(scan.analysis.risk_score)
    .bind(scan.analysis.threat_level)
    .bind(Json(&scan.analysis))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Most recent scans, newest first. Ties on `created_at` fall back to id
/// order so same-instant inserts still have a stable ordering.
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<ScanRecord>, AppError> {
    let records = sqlx::query_as::<_, ScanRecord>(
        r#"
        SELECT id, user_id, url, risk_score, threat_level, analysis, created_at
        FROM scans
        ORDER BY created_at DESC, id DESC
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Most recent scans for one user, newest first.
pub async fn recent_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ScanRecord>, AppError> {
    let records = sqlx::query_as::<_, ScanRecord>(
        r#"
        SELECT id, user_id, url, risk_score, threat_level, analysis, created_at
        FROM scans
        WHERE user_id = ?1
        ORDER BY created_at DESC, id DESC
        LIMIT ?2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Point lookup by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<ScanRecord, AppError> {
    let record = sqlx::query_as::<_, ScanRecord>(
        r#"
        SELECT id, user_id, url, risk_score, threat_level, analysis, created_at
        FROM scans
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| AppError::NotFound(format!("scan {id} not found")))
}

/// Exact count of scans at the given threat level.
pub async fn count_by_level(pool: &SqlitePool, level: ThreatLevel) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM scans WHERE threat_level = ?1")
        .bind(level)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
