//! Claim domain model.
//!
//! A claim is a `(URI, value)` assertion about a user or group. A meta claim
//! describes a claim URI without carrying a value and is used to select or
//! filter claims.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single attribute assertion about a user or group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Claim URI (e.g. `http://wso2.org/claims/username`).
    pub claim_uri: String,
    /// Claim value.
    pub value: String,
}

impl Claim {
    /// Creates a new claim.
    #[must_use]
    pub fn new(claim_uri: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_uri: claim_uri.into(),
            value: value.into(),
        }
    }

    /// Returns true if the claim carries no value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }

    /// Checks whether this claim is described by the given meta claim.
    #[must_use]
    pub fn matches(&self, meta: &MetaClaim) -> bool {
        self.claim_uri == meta.claim_uri
    }
}

/// Descriptor of a claim URI, independent of any value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaClaim {
    /// Dialect the claim URI belongs to.
    pub dialect_uri: String,
    /// Claim URI.
    pub claim_uri: String,
    /// Free-form descriptor properties (display name, regex, ...).
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl MetaClaim {
    /// Creates a new meta claim.
    #[must_use]
    pub fn new(dialect_uri: impl Into<String>, claim_uri: impl Into<String>) -> Self {
        Self {
            dialect_uri: dialect_uri.into(),
            claim_uri: claim_uri.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Adds a descriptor property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
