//! Backend error types.
//!
//! Every failure a backend reports to the store is a [`BackendError`]. The
//! store wraps it as its own backend-failure error and keeps this value as
//! the underlying cause.

use thiserror::Error;

/// Errors that can occur inside a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection error to the underlying store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid credentials format.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Entity not found in this backend.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// Type of entity (e.g., "user", "group").
        entity_type: &'static str,
        /// Backend-local id.
        id: String,
    },

    /// Operation not supported by this backend.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Timeout error.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl BackendError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a not supported error.
    #[must_use]
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported(operation.into())
    }

    /// Checks if this is an authentication error.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed(_) | Self::InvalidCredentials(_)
        )
    }

    /// Checks if this is a connection error.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
