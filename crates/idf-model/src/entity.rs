//! Payloads for adding users and groups.

use crate::claim::Claim;
use crate::credential::Credential;

/// A user to be added to a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Claims of the new user.
    pub claims: Vec<Claim>,
    /// Initial credentials of the new user.
    pub credentials: Vec<Credential>,
}

impl NewUser {
    /// Creates an empty user payload.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            claims: Vec::new(),
            credentials: Vec::new(),
        }
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, claim_uri: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_uri, value));
        self
    }

    /// Adds a credential.
    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credentials.push(credential);
        self
    }

    /// Returns true if the payload has neither claims nor credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty() && self.credentials.is_empty()
    }

    /// Gets the first non-blank claim with the given URI.
    #[must_use]
    pub fn claim(&self, claim_uri: &str) -> Option<&Claim> {
        self.claims
            .iter()
            .find(|c| c.claim_uri == claim_uri && !c.is_blank())
    }
}

/// A group to be added to a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGroup {
    /// Claims of the new group.
    pub claims: Vec<Claim>,
}

impl NewGroup {
    /// Creates an empty group payload.
    #[must_use]
    pub const fn new() -> Self {
        Self { claims: Vec::new() }
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, claim_uri: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_uri, value));
        self
    }

    /// Returns true if the payload has no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
