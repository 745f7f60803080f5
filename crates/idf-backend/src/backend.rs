//! Identity backend trait.
//!
//! ## Implementation Notes
//!
//! - Backends must be thread-safe (`Send + Sync`); the store calls them from
//!   arbitrary concurrent tasks and adds no locking of its own.
//! - All ids crossing this trait are backend-local. Encoding them into
//!   store-wide ids is the store's job.
//! - Write operations default to [`BackendError::NotSupported`] so read-only
//!   directories only implement the read side.
//! - Credential material must never be logged.

use std::fmt::Debug;

use async_trait::async_trait;
use idf_model::{Claim, Credential, MetaClaim, NewGroup, NewUser, Page};

use crate::config::BackendConfig;
use crate::error::{BackendError, BackendResult};

/// A pluggable identity data source.
#[async_trait]
pub trait IdentityBackend: Send + Sync + Debug {
    /// Returns the backend configuration.
    fn config(&self) -> &BackendConfig;

    /// Returns the backend id.
    fn id(&self) -> i32 {
        self.config().id
    }

    /// Returns the backend name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the backend priority (lower = higher priority).
    fn priority(&self) -> i32 {
        self.config().priority
    }

    /// Reports whether this backend can resolve users by the given claim URI.
    fn supports_claim(&self, claim_uri: &str) -> bool;

    // === Existence ===

    /// Checks whether a user exists.
    async fn is_user_exists(&self, user_id: &str) -> BackendResult<bool>;

    /// Checks whether a group exists.
    async fn is_group_exists(&self, group_id: &str) -> BackendResult<bool>;

    // === Lookup ===

    /// Resolves a user id from a claim. Returns `None` if no user matches.
    async fn find_user_id(&self, claim: &Claim) -> BackendResult<Option<String>>;

    /// Resolves a group id from a claim. Returns `None` if no group matches.
    async fn find_group_id(&self, claim: &Claim) -> BackendResult<Option<String>>;

    // === Listing ===

    /// Lists user ids.
    async fn list_user_ids(&self, page: Page) -> BackendResult<Vec<String>>;

    /// Lists ids of users carrying the given claim.
    async fn list_user_ids_by_claim(&self, claim: &Claim, page: Page)
        -> BackendResult<Vec<String>>;

    /// Lists ids of users whose claim described by `meta_claim` matches `pattern`.
    async fn list_user_ids_by_meta_claim(
        &self,
        meta_claim: &MetaClaim,
        pattern: &str,
        page: Page,
    ) -> BackendResult<Vec<String>>;

    /// Lists group ids.
    async fn list_group_ids(&self, page: Page) -> BackendResult<Vec<String>>;

    /// Lists ids of groups carrying the given claim.
    async fn list_group_ids_by_claim(
        &self,
        claim: &Claim,
        page: Page,
    ) -> BackendResult<Vec<String>>;

    /// Lists ids of groups whose claim described by `meta_claim` matches `pattern`.
    async fn list_group_ids_by_meta_claim(
        &self,
        meta_claim: &MetaClaim,
        pattern: &str,
        page: Page,
    ) -> BackendResult<Vec<String>>;

    // === Membership ===

    /// Gets the ids of the groups a user belongs to.
    async fn group_ids_of_user(&self, user_id: &str) -> BackendResult<Vec<String>>;

    /// Gets the ids of the users in a group.
    async fn user_ids_of_group(&self, group_id: &str) -> BackendResult<Vec<String>>;

    /// Checks whether a user is a member of a group.
    async fn is_user_in_group(&self, user_id: &str, group_id: &str) -> BackendResult<bool>;

    // === Claims ===

    /// Gets all claims of a user.
    async fn user_claims(&self, user_id: &str) -> BackendResult<Vec<Claim>>;

    /// Gets all claims of a group.
    async fn group_claims(&self, group_id: &str) -> BackendResult<Vec<Claim>>;

    /// Gets the claims of a user described by the given meta claims.
    async fn user_claims_for(
        &self,
        user_id: &str,
        meta_claims: &[MetaClaim],
    ) -> BackendResult<Vec<Claim>> {
        let claims = self.user_claims(user_id).await?;
        Ok(filter_claims(claims, meta_claims))
    }

    /// Gets the claims of a group described by the given meta claims.
    async fn group_claims_for(
        &self,
        group_id: &str,
        meta_claims: &[MetaClaim],
    ) -> BackendResult<Vec<Claim>> {
        let claims = self.group_claims(group_id).await?;
        Ok(filter_claims(claims, meta_claims))
    }

    // === Authentication ===

    /// Authenticates a user identified by `claim` with the given credentials.
    ///
    /// Returns the backend-local user id on success.
    ///
    /// ## Errors
    ///
    /// Returns `BackendError::AuthenticationFailed` if the credentials are
    /// rejected or the user is unknown.
    async fn authenticate(&self, claim: &Claim, credentials: &[Credential])
        -> BackendResult<String>;

    // === Writes (if supported) ===

    /// Adds a user and returns its backend-local id.
    async fn add_user(&self, _user: &NewUser) -> BackendResult<String> {
        Err(BackendError::not_supported("add user"))
    }

    /// Adds several users and returns their backend-local ids.
    ///
    /// The default adds them one by one and stops at the first failure.
    async fn add_users(&self, users: &[NewUser]) -> BackendResult<Vec<String>> {
        let mut ids = Vec::with_capacity(users.len());
        for user in users {
            ids.push(self.add_user(user).await?);
        }
        Ok(ids)
    }

    /// Adds a group and returns its backend-local id.
    async fn add_group(&self, _group: &NewGroup) -> BackendResult<String> {
        Err(BackendError::not_supported("add group"))
    }

    /// Adds several groups and returns their backend-local ids.
    ///
    /// The default adds them one by one and stops at the first failure.
    async fn add_groups(&self, groups: &[NewGroup]) -> BackendResult<Vec<String>> {
        let mut ids = Vec::with_capacity(groups.len());
        for group in groups {
            ids.push(self.add_group(group).await?);
        }
        Ok(ids)
    }

    /// Replaces all claims of a user.
    async fn update_user_claims(&self, _user_id: &str, _claims: &[Claim]) -> BackendResult<()> {
        Err(BackendError::not_supported("update user claims"))
    }

    /// Adds and removes claims of a user.
    async fn update_user_claims_delta(
        &self,
        _user_id: &str,
        _to_add: &[Claim],
        _to_remove: &[Claim],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update user claims"))
    }

    /// Replaces all claims of a group.
    async fn update_group_claims(&self, _group_id: &str, _claims: &[Claim]) -> BackendResult<()> {
        Err(BackendError::not_supported("update group claims"))
    }

    /// Adds and removes claims of a group.
    async fn update_group_claims_delta(
        &self,
        _group_id: &str,
        _to_add: &[Claim],
        _to_remove: &[Claim],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update group claims"))
    }

    /// Replaces all credentials of a user.
    async fn update_user_credentials(
        &self,
        _user_id: &str,
        _credentials: &[Credential],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update user credentials"))
    }

    /// Adds and removes credentials of a user.
    async fn update_user_credentials_delta(
        &self,
        _user_id: &str,
        _to_add: &[Credential],
        _to_remove: &[Credential],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update user credentials"))
    }

    /// Deletes a user.
    async fn delete_user(&self, _user_id: &str) -> BackendResult<()> {
        Err(BackendError::not_supported("delete user"))
    }

    /// Deletes a group.
    async fn delete_group(&self, _group_id: &str) -> BackendResult<()> {
        Err(BackendError::not_supported("delete group"))
    }

    /// Replaces the groups of a user.
    async fn update_groups_of_user(
        &self,
        _user_id: &str,
        _group_ids: &[String],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update groups of user"))
    }

    /// Adds and removes groups of a user.
    async fn update_groups_of_user_delta(
        &self,
        _user_id: &str,
        _to_add: &[String],
        _to_remove: &[String],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update groups of user"))
    }

    /// Replaces the users of a group.
    async fn update_users_of_group(
        &self,
        _group_id: &str,
        _user_ids: &[String],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update users of group"))
    }

    /// Adds and removes users of a group.
    async fn update_users_of_group_delta(
        &self,
        _group_id: &str,
        _to_add: &[String],
        _to_remove: &[String],
    ) -> BackendResult<()> {
        Err(BackendError::not_supported("update users of group"))
    }
}

fn filter_claims(claims: Vec<Claim>, meta_claims: &[MetaClaim]) -> Vec<Claim> {
    claims
        .into_iter()
        .filter(|c| meta_claims.iter().any(|m| c.matches(m)))
        .collect()
}
