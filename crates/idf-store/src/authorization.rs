//! Authorization seam.
//!
//! The store does not decide permissions. It carries the authorization store
//! it was built with and hands it to every user and group handle, so that
//! handles can answer permission checks lazily.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// A permission: an action on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Resource identifier.
    pub resource: String,
    /// Action on the resource.
    pub action: String,
}

impl Permission {
    /// Creates a permission.
    #[must_use]
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

/// Permission checks for users and groups, addressed by unique entity id.
#[async_trait]
pub trait AuthorizationStore: Send + Sync + Debug {
    /// Checks whether a user holds a permission.
    async fn is_user_authorized(
        &self,
        unique_user_id: &str,
        permission: &Permission,
        backend_name: &str,
    ) -> StoreResult<bool>;

    /// Checks whether a group holds a permission.
    async fn is_group_authorized(
        &self,
        unique_group_id: &str,
        permission: &Permission,
        backend_name: &str,
    ) -> StoreResult<bool>;
}
