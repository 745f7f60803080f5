//! Error handling for the identity store.
//!
//! One error type with an explicit [`ErrorKind`]. Callers branch on
//! [`StoreError::kind`] instead of on distinct error types.
//!
//! Authentication failures always display a generic message so that callers
//! cannot learn which backend rejected a credential, or why.

use std::error::Error as StdError;
use std::fmt;

use idf_backend::BackendError;
use thiserror::Error;

/// Boxed underlying cause of a [`StoreError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type alias using the store error type.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing arguments, unknown backend, cross-backend
    /// relationship. No backend was contacted.
    InvalidInput,
    /// The entity is confirmed absent by its backend.
    NotFound,
    /// A backend call failed; the backend error is attached as the cause.
    BackendFailure,
    /// Credentials were rejected.
    AuthenticationFailed,
    /// The store could not be built from the supplied backends or settings.
    Configuration,
}

impl ErrorKind {
    /// Returns a short, stable label for the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::NotFound => "not found",
            Self::BackendFailure => "backend failure",
            Self::AuthenticationFailed => "authentication failed",
            Self::Configuration => "configuration error",
        }
    }
}

/// Error returned by every identity store operation.
#[derive(Debug, Error)]
pub struct StoreError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl StoreError {
    fn new(kind: ErrorKind, message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self {
            kind,
            message: message.into(),
            source,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, msg, None)
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg, None)
    }

    /// Wraps a backend failure.
    #[must_use]
    pub fn backend(msg: impl Into<String>, cause: BackendError) -> Self {
        Self::new(ErrorKind::BackendFailure, msg, Some(Box::new(cause)))
    }

    /// Creates a generic authentication failure with no cause attached.
    #[must_use]
    pub fn authentication_failed() -> Self {
        Self::new(ErrorKind::AuthenticationFailed, "invalid user credentials", None)
    }

    /// Creates an authentication failure that keeps the backend cause for
    /// server-side diagnostics. The displayed message stays generic.
    #[must_use]
    pub fn authentication_rejected(cause: BackendError) -> Self {
        Self::new(
            ErrorKind::AuthenticationFailed,
            "invalid user credentials",
            Some(Box::new(cause)),
        )
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, msg, None)
    }

    /// Creates a configuration error with an underlying cause.
    #[must_use]
    pub fn configuration_caused_by(msg: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Configuration, msg, Some(cause.into()))
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detail message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the backend error this failure wraps, if any.
    #[must_use]
    pub fn backend_cause(&self) -> Option<&BackendError> {
        self.source
            .as_deref()
            .and_then(|e| e.downcast_ref::<BackendError>())
    }

    /// Checks if this is an invalid input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        self.kind == ErrorKind::InvalidInput
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Checks if this is a backend failure.
    #[must_use]
    pub fn is_backend_failure(&self) -> bool {
        self.kind == ErrorKind::BackendFailure
    }

    /// Checks if this is an authentication failure.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        self.kind == ErrorKind::AuthenticationFailed
    }

    /// Returns whether the failure was caused by the caller.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidInput | ErrorKind::NotFound | ErrorKind::AuthenticationFailed
        )
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // NIST 800-53 Rev5: IA-6 - generic authentication feedback
            ErrorKind::AuthenticationFailed => f.write_str(self.kind.as_str()),
            kind => write!(f, "{}: {}", kind.as_str(), self.message),
        }
    }
}
