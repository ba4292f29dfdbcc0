//! Recent-history search over persisted scans.
//!
//! Search operates on an already-bounded page (the most recent
//! `HISTORY_LIMIT` records), not the full table: the scope is "recent
//! history", which keeps the filter a cheap in-memory pass.

use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::scan::ScanRecord;
use crate::services::scan_store;

pub const HISTORY_LIMIT: i64 = 50;

/// Most recent scans, optionally user-scoped, filtered case-insensitively
/// where `url` or threat level contains `term` as a substring. An empty or
/// absent term returns the unfiltered page.
pub async fn search(
    pool: &SqlitePool,
    user_id: Option<i64>,
    term: Option<&str>,
) -> Result<Vec<ScanRecord>, AppError> {
    let page = match user_id {
        Some(uid) => scan_store::recent_for_user(pool, uid, HISTORY_LIMIT).await?,
        None => scan_store::recent(pool, HISTORY_LIMIT).await?,
    };

    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(page);
    };

    let needle = term.to_lowercase();
    Ok(page
        .into_iter()
        .filter(|record| {
            record.url.to_lowercase().contains(&needle)
                || record
                    .threat_level
                    .to_string()
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scan_store::insert;
    use crate::services::scan_store::tests::{sample_scan, test_pool};
    use tempfile::TempDir;

    async fn seeded_pool(dir: &TempDir) -> SqlitePool {
        let pool = test_pool(dir).await;
        for (url, score) in [
            ("https://good.com", 10),
            ("https://iffy.net", 55),
            ("https://bad.ru", 95),
        ] {
            insert(&pool, sample_scan(url, score)).await.unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn empty_term_returns_unfiltered_page() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir).await;

        assert_eq!(search(&pool, None, None).await.unwrap().len(), 3);
        assert_eq!(search(&pool, None, Some("")).await.unwrap().len(), 3);
        assert_eq!(search(&pool, None, Some("   ")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn matches_url_substring_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir).await;

        let hits = search(&pool, None, Some("IFFY")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://iffy.net");
    }

    #[tokio::test]
    async fn matches_threat_level_substring() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir).await;

        let hits = search(&pool, None, Some("malic")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://bad.ru");

        let none = search(&pool, None, Some("nomatch")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_scope_is_the_recent_page_only() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        // The oldest record falls off the 50-record page.
        insert(&pool, sample_scan("https://ancient.org", 10)).await.unwrap();
        for i in 0..HISTORY_LIMIT {
            insert(&pool, sample_scan(&format!("https://filler{i}.com"), 10))
                .await
                .unwrap();
        }

        let page = search(&pool, None, None).await.unwrap();
        assert_eq!(page.len(), HISTORY_LIMIT as usize);

        let hits = search(&pool, None, Some("ancient")).await.unwrap();
        assert!(hits.is_empty());
    }
}
