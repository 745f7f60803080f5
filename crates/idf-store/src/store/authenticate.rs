//! Authentication across backends.

use idf_model::{Claim, Credential};

use super::IdentityStore;
use crate::error::{StoreError, StoreResult};
use crate::handle::{AuthenticationContext, User};

impl IdentityStore {
    /// Authenticates a user identified by a claim.
    ///
    /// With a backend name, only that backend is tried. Without one, every
    /// backend supporting the claim is tried in priority order and the first
    /// success wins.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for an unknown backend name. Every rejected
    /// login returns the same generic `AuthenticationFailed` error, which
    /// never tells which backend refused or why. A backend failing for a
    /// reason other than the credentials returns `BackendFailure` at once,
    /// with or without a name, and no later backend is tried.
    pub async fn authenticate(
        &self,
        claim: &Claim,
        credentials: &[Credential],
        backend_name: Option<&str>,
    ) -> StoreResult<AuthenticationContext> {
        if claim.is_blank() || credentials.is_empty() {
            return Err(StoreError::authentication_failed());
        }

        if let Some(name) = backend_name.filter(|name| !name.is_empty()) {
            let backend = self.registry().by_name(name)?;
            return match backend.authenticate(claim, credentials).await {
                Ok(local_id) => {
                    tracing::debug!(backend = backend.name(), "user authenticated");
                    Ok(AuthenticationContext::new(User::build(
                        self, backend, &local_id,
                    )))
                }
                Err(e) if e.is_auth_error() => Err(StoreError::authentication_rejected(e)),
                Err(e) => Err(StoreError::backend(
                    format!("authentication against backend {} failed", backend.name()),
                    e,
                )),
            };
        }

        for backend in self.registry().iter() {
            if !backend.supports_claim(&claim.claim_uri) {
                tracing::debug!(
                    backend = backend.name(),
                    claim_uri = %claim.claim_uri,
                    "backend does not support claim, skipping"
                );
                continue;
            }

            match backend.authenticate(claim, credentials).await {
                Ok(local_id) => {
                    tracing::debug!(backend = backend.name(), "user authenticated");
                    return Ok(AuthenticationContext::new(User::build(
                        self, backend, &local_id,
                    )));
                }
                Err(e) if e.is_auth_error() => {
                    tracing::debug!(backend = backend.name(), error = %e, "authentication rejected");
                }
                Err(e) => {
                    tracing::warn!(backend = backend.name(), error = %e, "authentication attempt failed");
                    return Err(StoreError::backend(
                        format!("authentication against backend {} failed", backend.name()),
                        e,
                    ));
                }
            }
        }

        Err(StoreError::authentication_failed())
    }
}
