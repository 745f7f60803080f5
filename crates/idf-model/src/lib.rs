//! # idf-model
//!
//! Value types shared by the federated identity store and the backends
//! plugged into it.
//!
//! - [`Claim`] / [`MetaClaim`] - attribute assertions and their descriptors
//! - [`Credential`] - raw credential material handed to backends
//! - [`NewUser`] / [`NewGroup`] - payloads for add operations
//! - [`Page`] - validated pagination window

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claim;
pub mod credential;
pub mod entity;
pub mod page;

pub use claim::{Claim, MetaClaim};
pub use credential::Credential;
pub use entity::{NewGroup, NewUser};
pub use page::Page;
