//! Syntactic URL validation. No network access; a candidate either matches
//! the accepted grammar or is rejected as a validation error.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;

/// Accepted grammar: optional http(s) scheme, a dotted domain (alphanumeric
/// and hyphen labels, top-level label of at least two letters) or an IPv4
/// address, then optional port, path, query, and fragment.
fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:https?://)?(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}|\d{1,3}(?:\.\d{1,3}){3})(?::\d{1,5})?(?:[/?#]\S*)?$",
        )
        .expect("URL pattern compiles")
    })
}

pub fn is_valid(candidate: &str) -> bool {
    !candidate.is_empty() && url_pattern().is_match(candidate)
}

pub fn validate(candidate: &str) -> Result<(), AppError> {
    if is_valid(candidate) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "not a valid URL: {candidate}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domains() {
        assert!(is_valid("good.com"));
        assert!(is_valid("sub.domain.example.org"));
        assert!(is_valid("my-site.co.uk"));
    }

    #[test]
    fn accepts_schemes_ports_paths_queries_fragments() {
        assert!(is_valid("http://good.com"));
        assert!(is_valid("https://bad.ru/x?y=1#frag"));
        assert!(is_valid("example.com:8080"));
        assert!(is_valid("https://example.com:443/deep/path?q=a&r=b"));
    }

    #[test]
    fn accepts_ipv4_hosts() {
        assert!(is_valid("127.0.0.1"));
        assert!(is_valid("http://192.168.1.10:8080/admin"));
    }

    #[test]
    fn is_case_insensitive() {
        assert!(is_valid("HTTPS://EXAMPLE.COM/PATH"));
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(!is_valid(""));
        assert!(!is_valid("not a url"));
        assert!(!is_valid("http://"));
        assert!(!is_valid("example"));
        assert!(!is_valid(".com"));
        assert!(!is_valid("exa_mple.com"));
    }

    #[test]
    fn rejects_wrong_scheme_and_bad_labels() {
        assert!(!is_valid("ftp://example.com"));
        assert!(!is_valid("bad-.com"));
        assert!(!is_valid("site.c1"));
        assert!(!is_valid("1.2.3.4.5"));
    }

    #[test]
    fn validate_reports_validation_error() {
        let err = validate("not a url").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(validate("good.com").is_ok());
    }
}
