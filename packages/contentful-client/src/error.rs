//! Error types for the Contentful client.

use serde::Deserialize;
use thiserror::Error;

/// Result type for Contentful client operations.
pub type Result<T> = std::result::Result<T, ContentfulError>;

/// Contentful client errors.
///
/// Field-level problems inside an entry never surface here; they degrade to
/// defaults during normalization.
#[derive(Debug, Error)]
pub enum ContentfulError {
    /// Missing space, environment, or token. Raised before any request.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No landing page entry exists for the requested slug
    #[error("Landing page entry not found for slug '{slug}'")]
    NotFound { slug: String },

    /// Entry present but missing required system metadata
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Non-2xx response from the Content Delivery or Preview API
    #[error("Contentful API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error envelope returned by the Contentful APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    sys: Option<ErrorSys>,
}

#[derive(Debug, Deserialize)]
struct ErrorSys {
    #[serde(default)]
    id: Option<String>,
}

/// Best-effort description of a failed response.
///
/// Prefers the JSON error envelope, then the raw body, then the status reason.
pub(crate) fn describe_upstream_failure(body: &str, reason: Option<&str>) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let code = envelope.sys.and_then(|s| s.id).filter(|id| !id.is_empty());
        match (code, envelope.message.filter(|m| !m.is_empty())) {
            (Some(code), Some(message)) => return format!("{code}: {message}"),
            (None, Some(message)) => return message,
            (Some(code), None) => return code,
            (None, None) => {}
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    reason.unwrap_or("Unknown error").to_string()
}
