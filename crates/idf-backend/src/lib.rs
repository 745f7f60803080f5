//! # idf-backend
//!
//! Plugin contract for the identity backends federated by the identity store.
//!
//! A backend is one independent data source (directory, database, ...) that
//! stores users, groups and their claims under backend-local identifiers.
//! The store never sees how a backend persists anything; it only talks to the
//! [`IdentityBackend`] trait.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;

pub use backend::IdentityBackend;
pub use config::{BackendConfig, BackendConfigBuilder};
pub use error::{BackendError, BackendResult};
