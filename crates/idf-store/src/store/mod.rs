//! The federated identity store.
//!
//! [`IdentityStore`] routes every call to the backend that owns the entity:
//!
//! - calls addressed by unique id go to the backend encoded in the id;
//! - calls addressed by backend name go to that backend, or to the primary
//!   backend when no name is given;
//! - authentication without a backend name tries every backend that supports
//!   the claim, in priority order.
//!
//! The store holds no mutable state. Cloning it is cheap and clones share the
//! same registry.

mod authenticate;
mod groups;
mod users;

use std::sync::Arc;

use idf_backend::IdentityBackend;
use idf_model::{Claim, Page};

use crate::authorization::AuthorizationStore;
use crate::codec::EntityId;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::handle::{Group, User};
use crate::registry::{BackendRef, BackendRegistry};

/// Virtual identity store federating several backends.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    registry: BackendRegistry,
    authorization: Arc<dyn AuthorizationStore>,
    config: StoreConfig,
}

impl IdentityStore {
    /// Creates a store with the default configuration.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if no enabled backend is supplied or if
    /// backend ids or names collide.
    pub fn new(
        backends: Vec<Arc<dyn IdentityBackend>>,
        authorization: Arc<dyn AuthorizationStore>,
    ) -> StoreResult<Self> {
        Self::with_config(StoreConfig::default(), backends, authorization)
    }

    /// Creates a store with an explicit configuration.
    ///
    /// Backends whose configuration is disabled are left out.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if no enabled backend is supplied or if
    /// backend ids or names collide.
    pub fn with_config(
        config: StoreConfig,
        backends: Vec<Arc<dyn IdentityBackend>>,
        authorization: Arc<dyn AuthorizationStore>,
    ) -> StoreResult<Self> {
        let enabled = backends
            .into_iter()
            .filter(|backend| {
                let enabled = backend.config().enabled;
                if !enabled {
                    tracing::debug!(backend = backend.name(), "skipping disabled backend");
                }
                enabled
            })
            .collect();

        let registry = BackendRegistry::new(enabled)?;
        tracing::debug!(
            backends = registry.len(),
            primary = registry.primary()?.name(),
            "identity store initialized"
        );

        Ok(Self {
            inner: Arc::new(StoreInner {
                registry,
                authorization,
                config,
            }),
        })
    }

    /// Returns the backend registry.
    #[must_use]
    pub fn registry(&self) -> &BackendRegistry {
        &self.inner.registry
    }

    /// Returns the authorization store handed to every entity handle.
    #[must_use]
    pub fn authorization(&self) -> &Arc<dyn AuthorizationStore> {
        &self.inner.authorization
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Returns the name of the primary backend.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if no backend is registered.
    pub fn primary_backend_name(&self) -> StoreResult<&str> {
        self.registry().primary().map(|backend| backend.name())
    }

    /// Returns the names of all backends, sorted case-insensitively.
    #[must_use]
    pub fn backend_names(&self) -> Vec<String> {
        self.registry().names()
    }

    // === Routing ===

    /// Resolves a backend by name; no name (or an empty one) means the primary backend.
    fn resolve(&self, backend_name: Option<&str>) -> StoreResult<&BackendRef> {
        match backend_name.filter(|name| !name.is_empty()) {
            Some(name) => self.registry().by_name(name),
            None => self.registry().primary(),
        }
    }

    /// Decodes a unique id and resolves the backend holding the entity.
    fn locate(&self, unique_id: &str, entity: &str) -> StoreResult<(&BackendRef, EntityId)> {
        if unique_id.is_empty() {
            return Err(StoreError::invalid_input(format!("invalid unique {entity} id")));
        }
        let id = EntityId::decode(unique_id, self.registry())?;
        let backend = self
            .registry()
            .by_id(id.backend_id)
            .ok_or_else(|| StoreError::invalid_input(format!("invalid unique {entity} id")))?;
        Ok((backend, id))
    }

    /// Decodes ids that are about to be related to an entity of `owner_backend`.
    ///
    /// Fails on the first id that belongs to another backend, before anything
    /// is written.
    fn local_ids_in(&self, unique_ids: &[String], owner_backend: i32) -> StoreResult<Vec<String>> {
        unique_ids
            .iter()
            .map(|raw| {
                let id = EntityId::decode(raw, self.registry())?;
                if id.backend_id != owner_backend {
                    return Err(StoreError::invalid_input(
                        "cannot relate entities across backends",
                    ));
                }
                Ok(id.local_id)
            })
            .collect()
    }

    async fn ensure_user_exists(
        &self,
        backend: &BackendRef,
        local_id: &str,
        unique_id: &str,
    ) -> StoreResult<()> {
        let exists = backend
            .is_user_exists(local_id)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to check the existence of user {unique_id}"), e)
            })?;
        if exists {
            Ok(())
        } else {
            Err(StoreError::not_found(format!("user {unique_id} was not found")))
        }
    }

    async fn ensure_group_exists(
        &self,
        backend: &BackendRef,
        local_id: &str,
        unique_id: &str,
    ) -> StoreResult<()> {
        let exists = backend
            .is_group_exists(local_id)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to check the existence of group {unique_id}"), e)
            })?;
        if exists {
            Ok(())
        } else {
            Err(StoreError::not_found(format!("group {unique_id} was not found")))
        }
    }

    // === Handles ===

    fn users_from(&self, backend: &BackendRef, local_ids: &[String]) -> Vec<User> {
        local_ids
            .iter()
            .map(|local_id| User::build(self, backend, local_id))
            .collect()
    }

    fn groups_from(&self, backend: &BackendRef, local_ids: &[String]) -> Vec<Group> {
        local_ids
            .iter()
            .map(|local_id| Group::build(self, backend, local_id))
            .collect()
    }
}

/// Validates pagination arguments.
///
/// Returns `None` when nothing was requested (`length == 0`); a negative
/// length asks for everything from `offset` on.
fn page_window(offset: i32, length: i32) -> StoreResult<Option<Page>> {
    let offset =
        usize::try_from(offset).map_err(|_| StoreError::invalid_input("invalid offset value"))?;
    if length == 0 {
        return Ok(None);
    }
    Ok(Some(
        usize::try_from(length).map_or(Page::unbounded(offset), |limit| Page::new(offset, limit)),
    ))
}

fn require_claim(claim: &Claim) -> StoreResult<()> {
    if claim.claim_uri.is_empty() || claim.is_blank() {
        return Err(StoreError::invalid_input("invalid claim"));
    }
    Ok(())
}
