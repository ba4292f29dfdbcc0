//! Route definitions and router assembly for the SecureScan API.

pub mod dashboard;
pub mod health;
pub mod history;
pub mod scan;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::security_headers;
use crate::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the application router with shared middleware layers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/scan", post(scan::create))
        .route("/api/history", get(history::list))
        .route("/api/dashboard-stats", get(dashboard::stats))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::middleware::from_fn(
                    security_headers::set_security_headers,
                ))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
