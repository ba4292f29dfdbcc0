pub mod analyzer;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::analyzer::UrlAnalyzer;

/// Shared application state passed to all Axum handlers.
///
/// The store handle and the analysis provider are injected here rather than
/// held globally, so tests can build isolated instances per case.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: config::AppConfig,
    pub analyzer: Arc<dyn UrlAnalyzer>,
}
