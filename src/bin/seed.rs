//! Seed script for development — populates a fresh database with sample
//! scans through the deterministic stub analyzer.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads `DATABASE_URL` from the environment (falls back to the local
//! SQLite file).

use securescan::analyzer::stub::StubAnalyzer;
use securescan::analyzer::UrlAnalyzer;
use securescan::models::alert::AlertRule;
use securescan::models::scan::NewScan;
use securescan::models::user::User;
use securescan::services::{risk, scan_store};
use sqlx::SqlitePool;

const SAMPLE_URLS: &[&str] = &[
    "https://example.com",
    "https://docs.example.org/guide",
    "https://news.site.io/articles/today",
    "http://login-update.net/account",
    "http://free-gift-click.example.net",
    "http://phish-verify-account.ru/confirm",
    "http://malware-dropper.tk/payload",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://securescan.db".to_string());
    let pool = securescan::db::create_pool(&db_url, 5).await?;
    securescan::db::run_migrations(&pool).await?;

    println!("=== SecureScan Seed Script ===");

    let user_id = seed_analyst_user(&pool).await?;
    seed_alert_rule(&pool, user_id).await?;
    seed_sample_scans(&pool, user_id).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn seed_analyst_user(pool: &SqlitePool) -> anyhow::Result<i64> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM users WHERE email = 'analyst@securescan.local'")
            .fetch_optional(pool)
            .await?;

    if let Some(id) = existing {
        println!("[skip] Analyst user already exists (id {id})");
        return Ok(id);
    }

    // Credentials live with the external identity provider; the hash column
    // only exists to satisfy the schema.
    let user: User = sqlx::query_as(
        "INSERT INTO users (email, password_hash, role)
         VALUES ('analyst@securescan.local', 'external-idp', 'analyst')
         RETURNING id, email, password_hash, role, created_at",
    )
    .fetch_one(pool)
    .await?;

    println!("[done] Created analyst user {} (id {})", user.email, user.id);
    Ok(user.id)
}

async fn seed_alert_rule(pool: &SqlitePool, user_id: i64) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alert_rules")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Alert rules already exist ({count})");
        return Ok(());
    }

    let rule: AlertRule = sqlx::query_as(
        "INSERT INTO alert_rules (user_id, rule_type, threshold)
         VALUES (?1, 'risk_score_above', 70)
         RETURNING id, user_id, rule_type, threshold, created_at",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    println!(
        "[done] Created alert rule {} (threshold {})",
        rule.rule_type, rule.threshold
    );
    Ok(())
}

async fn seed_sample_scans(pool: &SqlitePool, user_id: i64) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scans")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Scans already exist ({count})");
        return Ok(());
    }

    let analyzer = StubAnalyzer;
    for url in SAMPLE_URLS {
        let raw = analyzer.analyze(url).await?;
        let analysis = risk::evaluate(raw)?;
        let record = scan_store::insert(
            pool,
            NewScan {
                user_id: Some(user_id),
                url: (*url).to_string(),
                analysis,
            },
        )
        .await?;
        println!(
            "[done] Seeded scan #{} {} ({}, score {})",
            record.id, record.url, record.threat_level, record.risk_score
        );
    }

    Ok(())
}
