//! Store configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Default claim URI carrying the username.
pub const DEFAULT_USERNAME_CLAIM: &str = "http://wso2.org/claims/username";

/// Identity store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Claim URI that carries the username of a user.
    pub username_claim_uri: String,

    /// Whether users added with claims must carry a non-empty username claim.
    pub require_username_claim: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            username_claim_uri: DEFAULT_USERNAME_CLAIM.to_string(),
            require_username_claim: true,
        }
    }
}

impl StoreConfig {
    /// Parses configuration from a TOML document.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if the document is not valid TOML or
    /// does not match the expected shape.
    pub fn from_toml_str(content: &str) -> StoreResult<Self> {
        toml::from_str(content)
            .map_err(|e| StoreError::configuration_caused_by("failed to parse store config", e))
    }

    /// Loads configuration from a TOML file.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::configuration_caused_by(
                format!("failed to read store config {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }
}
