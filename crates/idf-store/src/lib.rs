//! # idf-store
//!
//! Federated identity store.
//!
//! One virtual store presents users and groups held by several independent
//! backends:
//!
//! - [`BackendRegistry`] - backends by id, by name and in priority order
//! - [`codec`] - opaque unique ids naming a backend and a backend-local id
//! - [`IdentityStore`] - routes every call to the backend owning the entity
//!   and falls back across backends when authenticating
//! - [`User`] / [`Group`] - lazy handles returned by the store
//!
//! ## Example
//!
//! ```ignore
//! let store = IdentityStore::new(backends, authorization)?;
//! let ctx = store
//!     .authenticate(&Claim::new(DEFAULT_USERNAME_CLAIM, "jdoe"), &[Credential::password("s3cret")], None)
//!     .await?;
//! println!("{} from {}", ctx.user().unique_id(), ctx.user().backend_name());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authorization;
pub mod codec;
pub mod config;
pub mod error;
pub mod handle;
pub mod registry;
pub mod store;

pub use authorization::{AuthorizationStore, Permission};
pub use codec::EntityId;
pub use config::{StoreConfig, DEFAULT_USERNAME_CLAIM};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use handle::{AuthenticationContext, Group, User};
pub use registry::{BackendRef, BackendRegistry};
pub use store::IdentityStore;
