//! Error types for the Scribe client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Scribe client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body, or a placeholder when it could not be read
        message: String,
        /// The `detail` field of the error body, when the backend sent one
        detail: Option<String>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response parsed but describes an impossible job record
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built (e.g. a malformed base URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>, detail: Option<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
            detail,
        }
    }

    /// The backend-provided detail message, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ApiError { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The detail message, or `fallback` when the backend gave none
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// HTTP status code, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Whether retrying the same request later might succeed
    ///
    /// Transport failures, timeouts, 5xx responses and 429 are transient.
    /// Other 4xx responses and malformed bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => !e.is_decode() && !e.is_builder(),
            Self::ApiError { status: 429, .. } => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::ParseError(_) | Self::InvalidResponse(_) | Self::InvalidRequest(_) => false,
        }
    }
}
