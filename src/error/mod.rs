//! Error Handling Module
//!
//! Every operation in this crate returns [`GatewayError`] on failure. Errors
//! are surfaced to the caller as-is: nothing is retried, swallowed, or
//! translated into a different status.
//!
//! # Example
//!
//! ```rust,ignore
//! use gallery_gateway::GatewayError;
//!
//! let error = GatewayError::api_error(404, r#"{"detail":"Image not found"}"#);
//! assert_eq!(error.status_code(), Some(404));
//! assert!(error.is_client_error());
//! ```

mod conversions;

use thiserror::Error;

/// Errors produced by the gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport-level failure (connection refused, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` holds the raw response body; `details` holds the same body
    /// parsed as JSON when it was JSON.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// A successful response whose body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serializing a request body failed.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Invalid base URL, header, proxy or similar client setup problem.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The token store could not be read or written.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl GatewayError {
    /// Build an [`GatewayError::ApiError`] from a status and raw body,
    /// keeping a parsed copy of the body when it is JSON.
    pub fn api_error(code: u16, body: impl Into<String>) -> Self {
        let message = body.into();
        let details = serde_json::from_str(&message).ok();
        Self::ApiError {
            code,
            message,
            details,
        }
    }

    /// HTTP status of the failed response, if the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Structured error body returned by the backend, if any.
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ApiError { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    /// True for 401 and 403, i.e. a missing, expired or insufficient token.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}
