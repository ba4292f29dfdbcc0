//! Gemini-backed URL analysis client.
//!
//! Sends a fixed prompt template (weights, scoring guide, response schema)
//! to the `generateContent` REST endpoint with temperature 0, so repeated
//! calls for the same URL are comparable. A single attempt per scan with a
//! bounded total deadline; no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::analyzer::{parse_analysis, UrlAnalyzer};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::scan::RawAnalysis;
use crate::services::risk::RiskWeights;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiAnalyzer {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiAnalyzer {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.analysis_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        })
    }

    /// Fixed prompt template embedding the weight table and scoring guide.
    fn build_prompt(url: &str) -> String {
        let w = RiskWeights::default();
        format!(
            "Analyze the following URL for security threats: {url}\n\
             Calculate a Risk Score (0-100) based on these weights:\n\
             - Blacklist weight ({blacklist:.0}%)\n\
             - Domain age weight ({domain_age:.0}%)\n\
             - SSL validity weight ({ssl_validity:.0}%)\n\
             - Redirect chain weight ({redirect_chain:.0}%)\n\
             - IP reputation ({ip_reputation:.0}%)\n\
             - Phishing indicators ({phishing:.0}%)\n\
             \n\
             Scoring Guide:\n\
             0-30: Safe\n\
             31-70: Suspicious\n\
             71-100: Malicious\n\
             \n\
             Provide a JSON response with:\n\
             - risk_score: number\n\
             - threat_level: \"Safe\" | \"Suspicious\" | \"Malicious\"\n\
             - breakdown: {{ blacklist, domain_age, ssl_validity, redirect_chain, \
             ip_reputation, phishing_indicators }} (numbers)\n\
             - checks: {{ dns_lookup, whois_data, ssl_status, blacklist_check, \
             phishing_check, redirect_analysis, malware_signature, ip_reputation, \
             suspicious_keywords, homograph_detection }} (strings)\n\
             - recommendations: string[]\n\
             - summary: string\n\
             Only return valid JSON.",
            url = url,
            blacklist = w.blacklist * 100.0,
            domain_age = w.domain_age * 100.0,
            ssl_validity = w.ssl_validity * 100.0,
            redirect_chain = w.redirect_chain * 100.0,
            ip_reputation = w.ip_reputation * 100.0,
            phishing = w.phishing_indicators * 100.0,
        )
    }
}

#[async_trait]
impl UrlAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, url: &str) -> Result<RawAnalysis, AppError> {
        let endpoint = format!("{API_BASE}/{}:generateContent", self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": Self::build_prompt(url) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": 0.0
            }
        });

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("analysis request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Provider(format!(
                "analysis provider returned {status}"
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("malformed provider envelope: {e}")))?;

        let text = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                AppError::Provider("provider response contained no candidates".to_string())
            })?;

        parse_analysis(&text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}
