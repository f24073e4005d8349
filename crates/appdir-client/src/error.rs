//! Error types for the directory client.

use crate::transport::BoxError;

/// Errors that can occur while running a query.
///
/// The first four variants come from the single network round trip and
/// reach the caller unchanged. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The injected transport rejected the request.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The service answered with a status other than 200.
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The response was not declared as `application/json`.
    #[error("request to {url} returned content type {}", .content_type.as_deref().unwrap_or("<none>"))]
    UnexpectedContentType {
        url: String,
        content_type: Option<String>,
    },

    /// The body was not valid JSON or lacked the expected top-level field.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// A paginated listing was requested from a client built without a page size.
    #[error("paginated listings require pagination.page_size to be configured")]
    PaginationNotConfigured,
}

impl QueryError {
    pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading or validating a [`crate::ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong shape.
    #[error("failed to load client configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// `base_url` was empty.
    #[error("base_url must not be empty")]
    EmptyBaseUrl,

    /// `pagination.page_size` was zero.
    #[error("pagination.page_size must be greater than zero")]
    ZeroPageSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_url() {
        let err = QueryError::HttpStatus {
            url: "https://dir.example/applications".into(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "request to https://dir.example/applications returned HTTP 503"
        );
    }

    #[test]
    fn missing_content_type_message() {
        let err = QueryError::UnexpectedContentType {
            url: "u".into(),
            content_type: None,
        };
        assert_eq!(err.to_string(), "request to u returned content type <none>");
    }

    #[test]
    fn transport_error_keeps_source() {
        use std::error::Error as _;

        let err = QueryError::Transport {
            url: "u".into(),
            source: "connection reset".into(),
        };
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("connection reset"));
    }
}
