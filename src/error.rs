//! SDK error taxonomy.

use thiserror::Error;

/// Errors surfaced by the SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// Request parameters are malformed. Caller-side, never retried; the
    /// offending field path is reported (e.g. `parameters.user`).
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        /// Path of the offending field.
        field: String,
        /// What made the argument unusable.
        message: String,
    },

    /// The upstream API no longer supports this operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Twitter returned a non-success HTTP status.
    #[error("Twitter API error {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Error detail extracted from the response body.
        message: String,
    },

    /// Credentials were rejected. Caller must refresh credentials.
    #[error("authentication rejected: {message}")]
    Auth {
        /// Error detail extracted from the response body.
        message: String,
    },

    /// HTTP request failed before a response was obtained.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// OAuth signature generation failed.
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_argument(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the failure originates from the caller and must be fixed by
    /// the caller rather than retried.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::UnsupportedOperation(_)
        )
    }

    /// Whether the caller may reasonably retry the operation. The SDK itself
    /// never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Upstream { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_are_never_retryable() {
        let err = Error::invalid_argument("parameters.tweet", "no id");
        assert!(err.is_caller_error());
        assert!(!err.is_retryable());

        let err = Error::UnsupportedOperation("contributors");
        assert!(err.is_caller_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn auth_failures_are_never_retryable() {
        let err = Error::Auth {
            message: "invalid token".into(),
        };
        assert!(!err.is_retryable());
        assert!(!err.is_caller_error());
    }

    #[test]
    fn server_side_upstream_failures_are_retryable() {
        let err = Error::Upstream {
            status: 503,
            message: "over capacity".into(),
        };
        assert!(err.is_retryable());

        let err = Error::Upstream {
            status: 404,
            message: "not found".into(),
        };
        assert!(!err.is_retryable());
    }
}
