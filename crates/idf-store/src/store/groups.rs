//! Group operations.

use idf_model::{Claim, MetaClaim, NewGroup};

use super::{page_window, require_claim, IdentityStore};
use crate::error::{StoreError, StoreResult};
use crate::handle::{Group, User};

impl IdentityStore {
    /// Gets a group by unique id.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id, `NotFound` if the backend
    /// does not know the group and `BackendFailure` if the backend fails.
    pub async fn get_group(&self, unique_group_id: &str) -> StoreResult<Group> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        self.ensure_group_exists(backend, &id.local_id, unique_group_id)
            .await?;
        Ok(Group::build(self, backend, &id.local_id))
    }

    /// Gets the group identified by a claim.
    ///
    /// Only the named backend is searched, or the primary one when no name
    /// is given.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a blank claim or unknown backend name and
    /// `NotFound` if no group carries the claim.
    pub async fn get_group_by_claim(
        &self,
        claim: &Claim,
        backend_name: Option<&str>,
    ) -> StoreResult<Group> {
        require_claim(claim)?;
        let backend = self.resolve(backend_name)?;

        let local_id = backend.find_group_id(claim).await.map_err(|e| {
            StoreError::backend(format!("failed to find group in backend {}", backend.name()), e)
        })?;

        local_id
            .map(|local_id| Group::build(self, backend, &local_id))
            .ok_or_else(|| {
                StoreError::not_found(format!(
                    "no group with claim {} in backend {}",
                    claim.claim_uri,
                    backend.name()
                ))
            })
    }

    /// Lists groups of a backend.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a negative offset or unknown backend name.
    /// A zero length returns an empty list before the name is resolved.
    pub async fn list_groups(
        &self,
        offset: i32,
        length: i32,
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<Group>> {
        let Some(page) = page_window(offset, length)? else {
            return Ok(Vec::new());
        };
        let backend = self.resolve(backend_name)?;

        let ids = backend.list_group_ids(page).await.map_err(|e| {
            StoreError::backend(format!("failed to list groups of backend {}", backend.name()), e)
        })?;
        Ok(self.groups_from(backend, &ids))
    }

    /// Lists groups of a backend carrying a claim value.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a blank claim, a negative offset or an
    /// unknown backend name.
    pub async fn list_groups_by_claim(
        &self,
        claim: &Claim,
        offset: i32,
        length: i32,
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<Group>> {
        require_claim(claim)?;
        let Some(page) = page_window(offset, length)? else {
            return Ok(Vec::new());
        };
        let backend = self.resolve(backend_name)?;

        let ids = backend
            .list_group_ids_by_claim(claim, page)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to list groups of backend {}", backend.name()), e)
            })?;
        Ok(self.groups_from(backend, &ids))
    }

    /// Lists groups of a backend whose claim matches a pattern.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a meta claim without URI, a negative offset
    /// or an unknown backend name.
    pub async fn list_groups_by_meta_claim(
        &self,
        meta_claim: &MetaClaim,
        pattern: &str,
        offset: i32,
        length: i32,
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<Group>> {
        if meta_claim.claim_uri.is_empty() {
            return Err(StoreError::invalid_input("invalid meta claim"));
        }
        let Some(page) = page_window(offset, length)? else {
            return Ok(Vec::new());
        };
        let backend = self.resolve(backend_name)?;

        let ids = backend
            .list_group_ids_by_meta_claim(meta_claim, pattern, page)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to list groups of backend {}", backend.name()), e)
            })?;
        Ok(self.groups_from(backend, &ids))
    }

    /// Gets the members of a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `NotFound` if the group
    /// does not exist.
    pub async fn users_of_group(&self, unique_group_id: &str) -> StoreResult<Vec<User>> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        self.ensure_group_exists(backend, &id.local_id, unique_group_id)
            .await?;

        let ids = backend
            .user_ids_of_group(&id.local_id)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to get users of group {unique_group_id}"), e)
            })?;
        Ok(self.users_from(backend, &ids))
    }

    /// Gets all claims of a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn group_claims(&self, unique_group_id: &str) -> StoreResult<Vec<Claim>> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        backend.group_claims(&id.local_id).await.map_err(|e| {
            StoreError::backend(format!("failed to get claims of group {unique_group_id}"), e)
        })
    }

    /// Gets the claims of a group described by `meta_claims`.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn group_claims_for(
        &self,
        unique_group_id: &str,
        meta_claims: &[MetaClaim],
    ) -> StoreResult<Vec<Claim>> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        if meta_claims.is_empty() {
            return Ok(Vec::new());
        }
        backend
            .group_claims_for(&id.local_id, meta_claims)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to get claims of group {unique_group_id}"), e)
            })
    }

    /// Adds a group to a backend.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a payload without claims or an unknown
    /// backend name.
    pub async fn add_group(
        &self,
        group: &NewGroup,
        backend_name: Option<&str>,
    ) -> StoreResult<Group> {
        validate_new_group(group)?;
        let backend = self.resolve(backend_name)?;

        let local_id = backend.add_group(group).await.map_err(|e| {
            StoreError::backend(format!("failed to add group to backend {}", backend.name()), e)
        })?;
        tracing::info!(backend = backend.name(), "group added");
        Ok(Group::build(self, backend, &local_id))
    }

    /// Adds several groups to one backend.
    ///
    /// Every payload is validated before the backend is called.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for an empty batch, an invalid payload or an
    /// unknown backend name.
    pub async fn add_groups(
        &self,
        groups: &[NewGroup],
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<Group>> {
        if groups.is_empty() {
            return Err(StoreError::invalid_input("no groups to add"));
        }
        groups.iter().try_for_each(validate_new_group)?;
        let backend = self.resolve(backend_name)?;

        let ids = backend.add_groups(groups).await.map_err(|e| {
            StoreError::backend(format!("failed to add groups to backend {}", backend.name()), e)
        })?;
        tracing::info!(backend = backend.name(), count = ids.len(), "groups added");
        Ok(self.groups_from(backend, &ids))
    }

    /// Replaces all claims of a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn update_group_claims(
        &self,
        unique_group_id: &str,
        claims: &[Claim],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        backend
            .update_group_claims(&id.local_id, claims)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update claims of group {unique_group_id}"), e)
            })
    }

    /// Adds and removes claims of a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn update_group_claims_delta(
        &self,
        unique_group_id: &str,
        to_add: &[Claim],
        to_remove: &[Claim],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(());
        }
        backend
            .update_group_claims_delta(&id.local_id, to_add, to_remove)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update claims of group {unique_group_id}"), e)
            })
    }

    /// Deletes a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn delete_group(&self, unique_group_id: &str) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        backend.delete_group(&id.local_id).await.map_err(|e| {
            StoreError::backend(format!("failed to delete group {unique_group_id}"), e)
        })?;
        tracing::info!(backend = backend.name(), "group deleted");
        Ok(())
    }

    /// Replaces the members of a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id or a user held by another
    /// backend; nothing is written in that case.
    pub async fn update_users_of_group(
        &self,
        unique_group_id: &str,
        unique_user_ids: &[String],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        let user_ids = self.local_ids_in(unique_user_ids, id.backend_id)?;
        backend
            .update_users_of_group(&id.local_id, &user_ids)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update users of group {unique_group_id}"), e)
            })
    }

    /// Adds users to and removes users from a group.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id or a user held by another
    /// backend; nothing is written in that case.
    pub async fn update_users_of_group_delta(
        &self,
        unique_group_id: &str,
        to_add: &[String],
        to_remove: &[String],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_group_id, "group")?;
        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(());
        }
        let to_add = self.local_ids_in(to_add, id.backend_id)?;
        let to_remove = self.local_ids_in(to_remove, id.backend_id)?;
        backend
            .update_users_of_group_delta(&id.local_id, &to_add, &to_remove)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update users of group {unique_group_id}"), e)
            })
    }
}

fn validate_new_group(group: &NewGroup) -> StoreResult<()> {
    if group.is_empty() {
        return Err(StoreError::invalid_input("group has no claims"));
    }
    Ok(())
}
