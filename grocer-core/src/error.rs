//! Error types for grocer.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Transport and status failures surface to the caller unchanged; nothing
//! here is retried automatically.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using `GrocerError`.
pub type Result<T> = std::result::Result<T, GrocerError>;

/// Main error type for all grocer operations.
#[derive(Debug, Error)]
pub enum GrocerError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed (connection refused, DNS, broken body...).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The client-side request timeout elapsed.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// The service answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code returned by the service
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// A bounded wait gave up before the operation finished.
    #[error("Operation timed out after {0:?}")]
    OperationTimeout(Duration),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERVICE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The service returned `{"status": "error", "message": ...}`.
    #[error("Service error: {0}")]
    Backend(String),

    /// The response body could not be parsed at all (e.g. HTML with HTTP 200).
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// A field the caller relies on is absent from the response.
    #[error("Missing field in response: {0}")]
    MissingField(String),

    /// The response had a content type the caller cannot use.
    #[error("Unexpected content type: expected {expected}, got {actual}")]
    UnexpectedContentType {
        /// What the caller asked for
        expected: String,
        /// What the service sent
        actual: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GrocerError {
    /// Returns true if this error is transient and the user may retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            GrocerError::HttpError(_)
            | GrocerError::ConnectionTimeout(_)
            | GrocerError::OperationTimeout(_) => true,
            GrocerError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error was caused by a timeout of any kind.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            GrocerError::ConnectionTimeout(_) | GrocerError::OperationTimeout(_)
        )
    }

    /// Returns true if the service itself reported the failure.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            GrocerError::Backend(_) | GrocerError::HttpStatus { .. }
        )
    }
}
