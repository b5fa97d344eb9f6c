//! Error types for upstream SOAP failures.

use thiserror::Error;

/// Failures talking to the legislatie.just.ro web service.
///
/// The search executor recovers exactly one case locally (a stale cached
/// token, via its single retry); everything else propagates to the HTTP
/// boundary and becomes a JSON error envelope with status 500.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Token fetch failed: network error, non-200 status, or a response
    /// body without the expected token tag.
    #[error("upstream token fetch failed: {0}")]
    Auth(String),

    /// Search returned a non-success status after the retry policy was
    /// exhausted.
    #[error("upstream search rejected with status {status}: {snippet}")]
    Search { status: u16, snippet: String },

    /// Network, timeout, or TLS failure before any status was received.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The response was accepted but an expected field is missing.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// First 200 characters of a response body, for error messages.
pub fn body_snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_caps_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(body_snippet(&long).len(), 200);
        assert_eq!(body_snippet("short"), "short");
    }

    #[test]
    fn search_error_message_carries_status() {
        let err = UpstreamError::Search { status: 500, snippet: "fault".into() };
        assert!(err.to_string().contains("500"));
    }
}
