//! Unique entity id codec.
//!
//! A unique entity id is the standard base64 encoding of
//! `"<backendId>.<backendLocalId>"`. Only the first `.` separates the two
//! parts, so backend-local ids may contain dots themselves.
//!
//! Callers must treat the encoded form as opaque.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{StoreError, StoreResult};
use crate::registry::BackendRegistry;

const SEPARATOR: char = '.';

/// A decoded unique entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    /// Id of the backend holding the entity.
    pub backend_id: i32,
    /// Backend-local id of the entity.
    pub local_id: String,
}

impl EntityId {
    /// Creates a decoded id.
    #[must_use]
    pub fn new(backend_id: i32, local_id: impl Into<String>) -> Self {
        Self {
            backend_id,
            local_id: local_id.into(),
        }
    }

    /// Encodes this id into its opaque form.
    #[must_use]
    pub fn encode(&self) -> String {
        encode(self.backend_id, &self.local_id)
    }

    /// Decodes an opaque id and checks its backend against the registry.
    ///
    /// ## Errors
    ///
    /// Returns an invalid input error if `raw` is not base64, not UTF-8,
    /// lacks a non-empty backend id or local id, carries a backend id that is
    /// not a canonical decimal integer, or names a backend that is not
    /// registered.
    ///
    /// Only the form [`encode`] produces is accepted, so `"+1.x"` and
    /// `"01.x"` are rejected rather than aliased to backend 1.
    pub fn decode(raw: &str, registry: &BackendRegistry) -> StoreResult<Self> {
        let bytes = STANDARD.decode(raw).map_err(|_| invalid_id())?;
        let decoded = String::from_utf8(bytes).map_err(|_| invalid_id())?;

        let (backend_part, local_part) = decoded.split_once(SEPARATOR).ok_or_else(invalid_id)?;
        if backend_part.is_empty() || local_part.is_empty() {
            return Err(invalid_id());
        }

        let backend_id: i32 = backend_part.parse().map_err(|_| invalid_id())?;
        if backend_id.to_string() != backend_part || !registry.contains_id(backend_id) {
            return Err(invalid_id());
        }

        Ok(Self::new(backend_id, local_part))
    }
}

/// Encodes a `(backend id, local id)` pair into an opaque unique id.
#[must_use]
pub fn encode(backend_id: i32, local_id: &str) -> String {
    STANDARD.encode(format!("{backend_id}{SEPARATOR}{local_id}"))
}

fn invalid_id() -> StoreError {
    StoreError::invalid_input("invalid unique entity id")
}
