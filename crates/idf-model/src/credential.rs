//! Credential material.
//!
//! Credentials are passed through the store untouched: verifying or hashing
//! them is the job of the backend that owns the user.
//!
//! ## Security Note
//!
//! The secret bytes are never printed by `Debug` and must never be logged.

use std::fmt;

/// Credential type used for plain passwords.
pub const PASSWORD: &str = "password";

/// Raw credential material for authentication or credential updates.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    credential_type: String,
    secret: Vec<u8>,
}

impl Credential {
    /// Creates a credential of an arbitrary type.
    #[must_use]
    pub fn new(credential_type: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            credential_type: credential_type.into(),
            secret: secret.into(),
        }
    }

    /// Creates a password credential.
    #[must_use]
    pub fn password(password: impl Into<String>) -> Self {
        Self::new(PASSWORD, password.into().into_bytes())
    }

    /// Returns the credential type (e.g. `password`, `otp`).
    #[must_use]
    pub fn credential_type(&self) -> &str {
        &self.credential_type
    }

    /// Returns true if this is a password credential.
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.credential_type == PASSWORD
    }

    /// Returns the secret bytes.
    #[must_use]
    pub fn expose_secret(&self) -> &[u8] {
        &self.secret
    }

    /// Returns true if the credential carries no secret material.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
