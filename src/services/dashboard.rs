//! Dashboard statistics aggregation over the scan log.
//!
//! All reads are read-committed: a record inserted while the stats are
//! being gathered may or may not appear, which is acceptable for a
//! dashboard view.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::scan::{ScanRecord, ThreatLevel};
use crate::services::scan_store;

pub const RECENT_SCANS_LIMIT: i64 = 10;
pub const TOP_RISK_LIMIT: i64 = 5;
pub const TREND_DAYS: i64 = 7;

/// Aggregated dashboard statistics for the overview page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_scans: i64,
    pub malicious_scans: i64,
    pub suspicious_scans: i64,
    pub safe_scans: i64,
    pub recent_scans: Vec<ScanRecord>,
    pub top_risk_domains: Vec<TopRiskDomain>,
    pub trend: Vec<TrendBucket>,
}

/// A non-Safe scan ranked by descending risk score.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopRiskDomain {
    pub url: String,
    pub risk_score: i64,
    pub threat_level: ThreatLevel,
    pub created_at: DateTime<Utc>,
}

/// Scan count for one UTC calendar day.
#[derive(Debug, PartialEq, Serialize)]
pub struct TrendBucket {
    pub date: NaiveDate,
    pub count: i64,
}

/// Fetch all dashboard statistics in concurrent queries.
pub async fn get_stats(pool: &SqlitePool) -> Result<DashboardStats, AppError> {
    let (counts, recent_scans, top_risk_domains, trend) = tokio::try_join!(
        fetch_level_counts(pool),
        scan_store::recent(pool, RECENT_SCANS_LIMIT),
        fetch_top_risk_domains(pool, TOP_RISK_LIMIT),
        fetch_trend(pool, TREND_DAYS),
    )?;

    Ok(DashboardStats {
        total_scans: counts.total,
        malicious_scans: counts.malicious,
        suspicious_scans: counts.suspicious,
        safe_scans: counts.safe,
        recent_scans,
        top_risk_domains,
        trend,
    })
}

/// Intermediate row for threat level conditional aggregation.
#[derive(Debug, sqlx::FromRow)]
struct LevelCounts {
    total: i64,
    malicious: i64,
    suspicious: i64,
    safe: i64,
}

/// Count scans grouped by threat level in a single query.
async fn fetch_level_counts(pool: &SqlitePool) -> Result<LevelCounts, AppError> {
    let row = sqlx::query_as::<_, LevelCounts>(
        r#"
        SELECT
            COUNT(*) AS total,
            COALESCE(SUM(CASE WHEN threat_level = 'Malicious'  THEN 1 ELSE 0 END), 0) AS malicious,
            COALESCE(SUM(CASE WHEN threat_level = 'Suspicious' THEN 1 ELSE 0 END), 0) AS suspicious,
            COALESCE(SUM(CASE WHEN threat_level = 'Safe'       THEN 1 ELSE 0 END), 0) AS safe
        FROM scans
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Top non-Safe scans by risk score; ties go to the most recent.
async fn fetch_top_risk_domains(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<TopRiskDomain>, AppError> {
    let rows = sqlx::query_as::<_, TopRiskDomain>(
        r#"
        SELECT url, risk_score, threat_level, created_at
        FROM scans
        WHERE threat_level != 'Safe'
        ORDER BY risk_score DESC, created_at DESC
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Per-day scan counts for the last `days` UTC calendar days, oldest first.
///
/// The full date range is generated first and observed counts filled in, so
/// days without scans are present with count 0 instead of being omitted.
async fn fetch_trend(pool: &SqlitePool, days: i64) -> Result<Vec<TrendBucket>, AppError> {
    let today = Utc::now().date_naive();
    let start = today - Duration::days(days - 1);
    let cutoff = start
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();

    let timestamps: Vec<DateTime<Utc>> =
        sqlx::query_scalar("SELECT created_at FROM scans WHERE created_at >= ?1")
            .bind(cutoff)
            .fetch_all(pool)
            .await?;

    let mut counts: HashMap<NaiveDate, i64> = HashMap::new();
    for ts in timestamps {
        *counts.entry(ts.date_naive()).or_insert(0) += 1;
    }

    Ok((0..days)
        .map(|offset| {
            let date = start + Duration::days(offset);
            TrendBucket {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scan_store::tests::{sample_scan, test_pool};
    use crate::services::scan_store::insert;
    use sqlx::types::Json;
    use tempfile::TempDir;

    /// Insert a scan with an explicit `created_at`, bypassing the store's
    /// clock so trend bucketing can be exercised across days.
    async fn insert_backdated(pool: &SqlitePool, url: &str, score: i64, at: DateTime<Utc>) {
        let scan = sample_scan(url, score);
        sqlx::query(
            "INSERT INTO scans (user_id, url, risk_score, threat_level, analysis, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(scan.user_id)
        .bind(&scan.url)
        .bind(scan.analysis.risk_score)
        .bind(scan.analysis.threat_level)
        .bind(Json(&scan.analysis))
        .bind(at)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn counts_match_example_scenario() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        insert(&pool, sample_scan("https://good.com", 10)).await.unwrap();
        insert(&pool, sample_scan("https://iffy.net", 55)).await.unwrap();
        insert(&pool, sample_scan("https://bad.ru", 95)).await.unwrap();

        let stats = get_stats(&pool).await.unwrap();
        assert_eq!(stats.total_scans, 3);
        assert_eq!(stats.safe_scans, 1);
        assert_eq!(stats.suspicious_scans, 1);
        assert_eq!(stats.malicious_scans, 1);

        assert_eq!(stats.top_risk_domains.len(), 2);
        assert_eq!(stats.top_risk_domains[0].url, "https://bad.ru");
        assert_eq!(stats.top_risk_domains[0].risk_score, 95);
        assert_eq!(stats.top_risk_domains[1].url, "https://iffy.net");
        assert_eq!(stats.top_risk_domains[1].risk_score, 55);

        assert_eq!(stats.recent_scans.len(), 3);
        assert_eq!(stats.recent_scans[0].url, "https://bad.ru");
    }

    #[tokio::test]
    async fn top_risk_never_includes_safe() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        for i in 0..4 {
            insert(&pool, sample_scan(&format!("https://safe{i}.com"), 10))
                .await
                .unwrap();
        }
        insert(&pool, sample_scan("https://iffy.net", 40)).await.unwrap();

        let top = fetch_top_risk_domains(&pool, TOP_RISK_LIMIT).await.unwrap();
        assert_eq!(top.len(), 1);
        assert!(top.iter().all(|d| d.threat_level != ThreatLevel::Safe));
    }

    #[tokio::test]
    async fn top_risk_ties_break_newest_first() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        let now = Utc::now();
        insert_backdated(&pool, "https://older.net", 80, now - Duration::hours(2)).await;
        insert_backdated(&pool, "https://newer.net", 80, now - Duration::hours(1)).await;

        let top = fetch_top_risk_domains(&pool, TOP_RISK_LIMIT).await.unwrap();
        assert_eq!(top[0].url, "https://newer.net");
        assert_eq!(top[1].url, "https://older.net");
    }

    #[tokio::test]
    async fn trend_zero_fills_empty_days() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        let now = Utc::now();
        // Scans on only 2 of the last 7 days.
        insert_backdated(&pool, "https://a.com", 10, now).await;
        insert_backdated(&pool, "https://b.com", 10, now).await;
        insert_backdated(&pool, "https://c.com", 10, now - Duration::days(3)).await;
        // Outside the window entirely.
        insert_backdated(&pool, "https://old.com", 10, now - Duration::days(30)).await;

        let trend = fetch_trend(&pool, TREND_DAYS).await.unwrap();
        assert_eq!(trend.len(), 7);

        let today = now.date_naive();
        for (offset, bucket) in trend.iter().enumerate() {
            assert_eq!(bucket.date, today - Duration::days(6 - offset as i64));
        }

        assert_eq!(trend[6].count, 2);
        assert_eq!(trend[3].count, 1);
        let total: i64 = trend.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn trend_on_empty_store_is_all_zero() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        let trend = fetch_trend(&pool, TREND_DAYS).await.unwrap();
        assert_eq!(trend.len(), 7);
        assert!(trend.iter().all(|b| b.count == 0));
    }
}
