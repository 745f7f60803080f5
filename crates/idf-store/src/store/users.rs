//! User operations.

use idf_model::{Claim, Credential, MetaClaim, NewUser};

use super::{page_window, require_claim, IdentityStore};
use crate::error::{StoreError, StoreResult};
use crate::handle::{Group, User};

impl IdentityStore {
    /// Gets a user by unique id.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id, `NotFound` if the backend
    /// does not know the user and `BackendFailure` if the backend fails.
    pub async fn get_user(&self, unique_user_id: &str) -> StoreResult<User> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        self.ensure_user_exists(backend, &id.local_id, unique_user_id)
            .await?;
        Ok(User::build(self, backend, &id.local_id))
    }

    /// Gets the user identified by a claim.
    ///
    /// Only the named backend is searched, or the primary one when no name
    /// is given.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a blank claim or unknown backend name and
    /// `NotFound` if no user carries the claim.
    pub async fn get_user_by_claim(
        &self,
        claim: &Claim,
        backend_name: Option<&str>,
    ) -> StoreResult<User> {
        require_claim(claim)?;
        let backend = self.resolve(backend_name)?;

        let local_id = backend.find_user_id(claim).await.map_err(|e| {
            StoreError::backend(format!("failed to find user in backend {}", backend.name()), e)
        })?;

        match local_id {
            Some(local_id) => Ok(User::build(self, backend, &local_id)),
            None => Err(StoreError::not_found(format!(
                "no user with claim {} in backend {}",
                claim.claim_uri,
                backend.name()
            ))),
        }
    }

    /// Lists users of a backend.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a negative offset or unknown backend name.
    /// A zero length returns an empty list before the name is resolved.
    pub async fn list_users(
        &self,
        offset: i32,
        length: i32,
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<User>> {
        let Some(page) = page_window(offset, length)? else {
            return Ok(Vec::new());
        };
        let backend = self.resolve(backend_name)?;

        let ids = backend.list_user_ids(page).await.map_err(|e| {
            StoreError::backend(format!("failed to list users of backend {}", backend.name()), e)
        })?;
        Ok(self.users_from(backend, &ids))
    }

    /// Lists users of a backend carrying a claim value.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a blank claim, a negative offset or an
    /// unknown backend name.
    pub async fn list_users_by_claim(
        &self,
        claim: &Claim,
        offset: i32,
        length: i32,
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<User>> {
        require_claim(claim)?;
        let Some(page) = page_window(offset, length)? else {
            return Ok(Vec::new());
        };
        let backend = self.resolve(backend_name)?;

        let ids = backend
            .list_user_ids_by_claim(claim, page)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to list users of backend {}", backend.name()), e)
            })?;
        Ok(self.users_from(backend, &ids))
    }

    /// Lists users of a backend whose claim matches a pattern.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a meta claim without URI, a negative offset
    /// or an unknown backend name.
    pub async fn list_users_by_meta_claim(
        &self,
        meta_claim: &MetaClaim,
        pattern: &str,
        offset: i32,
        length: i32,
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<User>> {
        if meta_claim.claim_uri.is_empty() {
            return Err(StoreError::invalid_input("invalid meta claim"));
        }
        let Some(page) = page_window(offset, length)? else {
            return Ok(Vec::new());
        };
        let backend = self.resolve(backend_name)?;

        let ids = backend
            .list_user_ids_by_meta_claim(meta_claim, pattern, page)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to list users of backend {}", backend.name()), e)
            })?;
        Ok(self.users_from(backend, &ids))
    }

    /// Gets the groups a user belongs to.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `NotFound` if the user
    /// does not exist.
    pub async fn groups_of_user(&self, unique_user_id: &str) -> StoreResult<Vec<Group>> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        self.ensure_user_exists(backend, &id.local_id, unique_user_id)
            .await?;

        let ids = backend
            .group_ids_of_user(&id.local_id)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to get groups of user {unique_user_id}"), e)
            })?;
        Ok(self.groups_from(backend, &ids))
    }

    /// Checks whether a user is a member of a group.
    ///
    /// Entities held by different backends are never related; that case
    /// answers `false` without contacting any backend.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `NotFound` if either
    /// entity does not exist.
    pub async fn is_user_in_group(
        &self,
        unique_user_id: &str,
        unique_group_id: &str,
    ) -> StoreResult<bool> {
        let (backend, user) = self.locate(unique_user_id, "user")?;
        let (_, group) = self.locate(unique_group_id, "group")?;
        if user.backend_id != group.backend_id {
            tracing::debug!(
                user_backend = user.backend_id,
                group_backend = group.backend_id,
                "user and group live in different backends"
            );
            return Ok(false);
        }

        self.ensure_user_exists(backend, &user.local_id, unique_user_id)
            .await?;
        self.ensure_group_exists(backend, &group.local_id, unique_group_id)
            .await?;

        backend
            .is_user_in_group(&user.local_id, &group.local_id)
            .await
            .map_err(|e| StoreError::backend("failed to check group membership", e))
    }

    /// Gets all claims of a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn user_claims(&self, unique_user_id: &str) -> StoreResult<Vec<Claim>> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        backend.user_claims(&id.local_id).await.map_err(|e| {
            StoreError::backend(format!("failed to get claims of user {unique_user_id}"), e)
        })
    }

    /// Gets the claims of a user described by `meta_claims`.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn user_claims_for(
        &self,
        unique_user_id: &str,
        meta_claims: &[MetaClaim],
    ) -> StoreResult<Vec<Claim>> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        if meta_claims.is_empty() {
            return Ok(Vec::new());
        }
        backend
            .user_claims_for(&id.local_id, meta_claims)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to get claims of user {unique_user_id}"), e)
            })
    }

    /// Adds a user to a backend.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for an empty payload, a payload without
    /// username claim or an unknown backend name.
    pub async fn add_user(&self, user: &NewUser, backend_name: Option<&str>) -> StoreResult<User> {
        self.validate_new_user(user)?;
        let backend = self.resolve(backend_name)?;

        let local_id = backend.add_user(user).await.map_err(|e| {
            StoreError::backend(format!("failed to add user to backend {}", backend.name()), e)
        })?;
        tracing::info!(backend = backend.name(), "user added");
        Ok(User::build(self, backend, &local_id))
    }

    /// Adds several users to one backend.
    ///
    /// Every payload is validated before the backend is called.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for an empty batch, an invalid payload or an
    /// unknown backend name.
    pub async fn add_users(
        &self,
        users: &[NewUser],
        backend_name: Option<&str>,
    ) -> StoreResult<Vec<User>> {
        if users.is_empty() {
            return Err(StoreError::invalid_input("no users to add"));
        }
        for user in users {
            self.validate_new_user(user)?;
        }
        let backend = self.resolve(backend_name)?;

        let ids = backend.add_users(users).await.map_err(|e| {
            StoreError::backend(format!("failed to add users to backend {}", backend.name()), e)
        })?;
        tracing::info!(backend = backend.name(), count = ids.len(), "users added");
        Ok(self.users_from(backend, &ids))
    }

    /// Replaces all claims of a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn update_user_claims(&self, unique_user_id: &str, claims: &[Claim]) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        backend
            .update_user_claims(&id.local_id, claims)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update claims of user {unique_user_id}"), e)
            })
    }

    /// Adds and removes claims of a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn update_user_claims_delta(
        &self,
        unique_user_id: &str,
        to_add: &[Claim],
        to_remove: &[Claim],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(());
        }
        backend
            .update_user_claims_delta(&id.local_id, to_add, to_remove)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update claims of user {unique_user_id}"), e)
            })
    }

    /// Replaces all credentials of a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn update_user_credentials(
        &self,
        unique_user_id: &str,
        credentials: &[Credential],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        backend
            .update_user_credentials(&id.local_id, credentials)
            .await
            .map_err(|e| {
                StoreError::backend(
                    format!("failed to update credentials of user {unique_user_id}"),
                    e,
                )
            })
    }

    /// Adds and removes credentials of a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn update_user_credentials_delta(
        &self,
        unique_user_id: &str,
        to_add: &[Credential],
        to_remove: &[Credential],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(());
        }
        backend
            .update_user_credentials_delta(&id.local_id, to_add, to_remove)
            .await
            .map_err(|e| {
                StoreError::backend(
                    format!("failed to update credentials of user {unique_user_id}"),
                    e,
                )
            })
    }

    /// Deletes a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id and `BackendFailure` if the
    /// backend fails.
    pub async fn delete_user(&self, unique_user_id: &str) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        backend.delete_user(&id.local_id).await.map_err(|e| {
            StoreError::backend(format!("failed to delete user {unique_user_id}"), e)
        })?;
        tracing::info!(backend = backend.name(), "user deleted");
        Ok(())
    }

    /// Replaces the groups of a user.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id or a group held by another
    /// backend; nothing is written in that case.
    pub async fn update_groups_of_user(
        &self,
        unique_user_id: &str,
        unique_group_ids: &[String],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        let group_ids = self.local_ids_in(unique_group_ids, id.backend_id)?;
        backend
            .update_groups_of_user(&id.local_id, &group_ids)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update groups of user {unique_user_id}"), e)
            })
    }

    /// Adds a user to and removes it from groups.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidInput` for a malformed id or a group held by another
    /// backend; nothing is written in that case.
    pub async fn update_groups_of_user_delta(
        &self,
        unique_user_id: &str,
        to_add: &[String],
        to_remove: &[String],
    ) -> StoreResult<()> {
        let (backend, id) = self.locate(unique_user_id, "user")?;
        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(());
        }
        let to_add = self.local_ids_in(to_add, id.backend_id)?;
        let to_remove = self.local_ids_in(to_remove, id.backend_id)?;
        backend
            .update_groups_of_user_delta(&id.local_id, &to_add, &to_remove)
            .await
            .map_err(|e| {
                StoreError::backend(format!("failed to update groups of user {unique_user_id}"), e)
            })
    }

    fn validate_new_user(&self, user: &NewUser) -> StoreResult<()> {
        if user.is_empty() {
            return Err(StoreError::invalid_input("user has neither claims nor credentials"));
        }
        let config = self.config();
        if config.require_username_claim
            && !user.claims.is_empty()
            && user.claim(&config.username_claim_uri).is_none()
        {
            return Err(StoreError::invalid_input(format!(
                "user claims lack {}",
                config.username_claim_uri
            )));
        }
        Ok(())
    }
}
