//! User and group handles.
//!
//! Handles are plain values returned by the store: the encoded unique id,
//! the name of the backend that holds the entity, and the references needed
//! to run further operations on it later. Building one never contacts a
//! backend.

use std::fmt;
use std::sync::Arc;

use idf_model::{Claim, Credential, MetaClaim};

use crate::authorization::{AuthorizationStore, Permission};
use crate::codec;
use crate::error::StoreResult;
use crate::registry::BackendRef;
use crate::store::IdentityStore;

/// A user of the federated store.
#[derive(Clone)]
pub struct User {
    unique_id: String,
    backend_name: String,
    store: IdentityStore,
    authorization: Arc<dyn AuthorizationStore>,
}

impl User {
    /// Builds a handle for a backend-local user id.
    pub(crate) fn build(store: &IdentityStore, backend: &BackendRef, local_id: &str) -> Self {
        Self {
            unique_id: codec::encode(backend.id(), local_id),
            backend_name: backend.name().to_string(),
            store: store.clone(),
            authorization: Arc::clone(store.authorization()),
        }
    }

    /// Returns the unique user id.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the name of the backend holding this user.
    #[must_use]
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Returns the store this user belongs to.
    #[must_use]
    pub const fn store(&self) -> &IdentityStore {
        &self.store
    }

    /// Gets all claims of this user.
    pub async fn claims(&self) -> StoreResult<Vec<Claim>> {
        self.store.user_claims(&self.unique_id).await
    }

    /// Gets the claims of this user described by `meta_claims`.
    pub async fn claims_for(&self, meta_claims: &[MetaClaim]) -> StoreResult<Vec<Claim>> {
        self.store.user_claims_for(&self.unique_id, meta_claims).await
    }

    /// Gets the groups this user belongs to.
    pub async fn groups(&self) -> StoreResult<Vec<Group>> {
        self.store.groups_of_user(&self.unique_id).await
    }

    /// Checks whether this user is a member of a group.
    pub async fn is_in_group(&self, unique_group_id: &str) -> StoreResult<bool> {
        self.store
            .is_user_in_group(&self.unique_id, unique_group_id)
            .await
    }

    /// Replaces the claims of this user.
    pub async fn update_claims(&self, claims: &[Claim]) -> StoreResult<()> {
        self.store.update_user_claims(&self.unique_id, claims).await
    }

    /// Adds and removes claims of this user.
    pub async fn update_claims_delta(
        &self,
        to_add: &[Claim],
        to_remove: &[Claim],
    ) -> StoreResult<()> {
        self.store
            .update_user_claims_delta(&self.unique_id, to_add, to_remove)
            .await
    }

    /// Replaces the credentials of this user.
    pub async fn update_credentials(&self, credentials: &[Credential]) -> StoreResult<()> {
        self.store
            .update_user_credentials(&self.unique_id, credentials)
            .await
    }

    /// Adds and removes credentials of this user.
    pub async fn update_credentials_delta(
        &self,
        to_add: &[Credential],
        to_remove: &[Credential],
    ) -> StoreResult<()> {
        self.store
            .update_user_credentials_delta(&self.unique_id, to_add, to_remove)
            .await
    }

    /// Replaces the groups of this user.
    pub async fn update_groups(&self, unique_group_ids: &[String]) -> StoreResult<()> {
        self.store
            .update_groups_of_user(&self.unique_id, unique_group_ids)
            .await
    }

    /// Adds this user to and removes it from groups.
    pub async fn update_groups_delta(
        &self,
        to_add: &[String],
        to_remove: &[String],
    ) -> StoreResult<()> {
        self.store
            .update_groups_of_user_delta(&self.unique_id, to_add, to_remove)
            .await
    }

    /// Deletes this user.
    pub async fn delete(self) -> StoreResult<()> {
        self.store.delete_user(&self.unique_id).await
    }

    /// Checks whether this user holds a permission.
    pub async fn is_authorized(&self, permission: &Permission) -> StoreResult<bool> {
        self.authorization
            .is_user_authorized(&self.unique_id, permission, &self.backend_name)
            .await
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("unique_id", &self.unique_id)
            .field("backend_name", &self.backend_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id == other.unique_id && self.backend_name == other.backend_name
    }
}

impl Eq for User {}

/// A group of the federated store.
#[derive(Clone)]
pub struct Group {
    unique_id: String,
    backend_name: String,
    store: IdentityStore,
    authorization: Arc<dyn AuthorizationStore>,
}

impl Group {
    /// Builds a handle for a backend-local group id.
    pub(crate) fn build(store: &IdentityStore, backend: &BackendRef, local_id: &str) -> Self {
        Self {
            unique_id: codec::encode(backend.id(), local_id),
            backend_name: backend.name().to_string(),
            store: store.clone(),
            authorization: Arc::clone(store.authorization()),
        }
    }

    /// Returns the unique group id.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the name of the backend holding this group.
    #[must_use]
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Returns the store this group belongs to.
    #[must_use]
    pub const fn store(&self) -> &IdentityStore {
        &self.store
    }

    /// Gets all claims of this group.
    pub async fn claims(&self) -> StoreResult<Vec<Claim>> {
        self.store.group_claims(&self.unique_id).await
    }

    /// Gets the claims of this group described by `meta_claims`.
    pub async fn claims_for(&self, meta_claims: &[MetaClaim]) -> StoreResult<Vec<Claim>> {
        self.store.group_claims_for(&self.unique_id, meta_claims).await
    }

    /// Gets the members of this group.
    pub async fn users(&self) -> StoreResult<Vec<User>> {
        self.store.users_of_group(&self.unique_id).await
    }

    /// Checks whether a user is a member of this group.
    pub async fn has_member(&self, unique_user_id: &str) -> StoreResult<bool> {
        self.store
            .is_user_in_group(unique_user_id, &self.unique_id)
            .await
    }

    /// Replaces the claims of this group.
    pub async fn update_claims(&self, claims: &[Claim]) -> StoreResult<()> {
        self.store.update_group_claims(&self.unique_id, claims).await
    }

    /// Adds and removes claims of this group.
    pub async fn update_claims_delta(
        &self,
        to_add: &[Claim],
        to_remove: &[Claim],
    ) -> StoreResult<()> {
        self.store
            .update_group_claims_delta(&self.unique_id, to_add, to_remove)
            .await
    }

    /// Replaces the members of this group.
    pub async fn update_users(&self, unique_user_ids: &[String]) -> StoreResult<()> {
        self.store
            .update_users_of_group(&self.unique_id, unique_user_ids)
            .await
    }

    /// Adds users to and removes users from this group.
    pub async fn update_users_delta(
        &self,
        to_add: &[String],
        to_remove: &[String],
    ) -> StoreResult<()> {
        self.store
            .update_users_of_group_delta(&self.unique_id, to_add, to_remove)
            .await
    }

    /// Deletes this group.
    pub async fn delete(self) -> StoreResult<()> {
        self.store.delete_group(&self.unique_id).await
    }

    /// Checks whether this group holds a permission.
    pub async fn is_authorized(&self, permission: &Permission) -> StoreResult<bool> {
        self.authorization
            .is_group_authorized(&self.unique_id, permission, &self.backend_name)
            .await
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("unique_id", &self.unique_id)
            .field("backend_name", &self.backend_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id == other.unique_id && self.backend_name == other.backend_name
    }
}

impl Eq for Group {}

/// Outcome of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationContext {
    user: User,
}

impl AuthenticationContext {
    pub(crate) const fn new(user: User) -> Self {
        Self { user }
    }

    /// Returns the authenticated user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Consumes the context and returns the authenticated user.
    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }
}
