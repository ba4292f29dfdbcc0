//! External URL analysis collaborators.
//!
//! The provider is opaque: given a URL it returns a JSON payload attempting
//! the `RawAnalysis` schema. Implementations only fetch and parse; the risk
//! model owns validation of whatever comes back.

pub mod gemini;
pub mod stub;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::scan::RawAnalysis;

/// Pluggable URL analysis provider.
///
/// One provider call per scan request; implementations fail fast rather
/// than retrying, and callers must not hold a store handle across the call.
#[async_trait]
pub trait UrlAnalyzer: Send + Sync {
    /// Analyze a URL, returning the provider's untrusted structured verdict.
    async fn analyze(&self, url: &str) -> Result<RawAnalysis, AppError>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}

/// Parse the provider's response text into the untrusted analysis shape.
///
/// Individual absent fields default inside `RawAnalysis`; a payload that is
/// not JSON at all is a provider error.
pub(crate) fn parse_analysis(text: &str) -> Result<RawAnalysis, AppError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::warn!(error = %e, "unparseable analysis payload");
        AppError::Provider(format!("unparseable analysis payload: {e}"))
    })
}
