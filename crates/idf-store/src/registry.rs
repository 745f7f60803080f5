//! Backend registry.
//!
//! Immutable index of the backends federated by one store: by id, by
//! case-insensitive name, and in priority order. Built once; nothing mutates
//! it afterwards, so concurrent reads need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use idf_backend::IdentityBackend;

use crate::error::{StoreError, StoreResult};

/// Shared handle to a registered backend.
pub type BackendRef = Arc<dyn IdentityBackend>;

/// Index of the backends known to a store.
#[derive(Debug)]
pub struct BackendRegistry {
    /// Backends sorted by `(priority, insertion sequence)`.
    ordered: Vec<BackendRef>,

    /// Lower-cased name to position in `ordered`.
    by_name: HashMap<String, usize>,

    /// Backend id to position in `ordered`.
    by_id: HashMap<i32, usize>,
}

impl BackendRegistry {
    /// Builds the registry.
    ///
    /// Backends with equal priority are all kept and ordered by their
    /// position in `backends`.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if `backends` is empty or if two
    /// backends share an id or a name (names compare case-insensitively).
    pub fn new(backends: Vec<BackendRef>) -> StoreResult<Self> {
        if backends.is_empty() {
            return Err(StoreError::configuration("no backends registered"));
        }

        let mut keyed: Vec<((i32, usize), BackendRef)> = backends
            .into_iter()
            .enumerate()
            .map(|(seq, backend)| ((backend.priority(), seq), backend))
            .collect();
        keyed.sort_by_key(|(key, _)| *key);

        let ordered: Vec<BackendRef> = keyed.into_iter().map(|(_, backend)| backend).collect();

        let mut by_name = HashMap::with_capacity(ordered.len());
        let mut by_id = HashMap::with_capacity(ordered.len());

        for (index, backend) in ordered.iter().enumerate() {
            if by_id.insert(backend.id(), index).is_some() {
                return Err(StoreError::configuration(format!(
                    "duplicate backend id {}",
                    backend.id()
                )));
            }
            if by_name.insert(backend.name().to_lowercase(), index).is_some() {
                return Err(StoreError::configuration(format!(
                    "duplicate backend name '{}'",
                    backend.name()
                )));
            }
        }

        Ok(Self {
            ordered,
            by_name,
            by_id,
        })
    }

    /// Returns the primary backend (lowest priority, first registered on ties).
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if the registry is empty, which cannot
    /// happen for a registry built through [`BackendRegistry::new`].
    pub fn primary(&self) -> StoreResult<&BackendRef> {
        self.ordered
            .first()
            .ok_or_else(|| StoreError::configuration("no backends registered"))
    }

    /// Gets a backend by name (case-insensitive).
    ///
    /// ## Errors
    ///
    /// Returns an invalid input error if no backend has this name.
    pub fn by_name(&self, name: &str) -> StoreResult<&BackendRef> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.ordered[index])
            .ok_or_else(|| StoreError::invalid_input(format!("backend '{name}' was not found")))
    }

    /// Gets a backend by id.
    #[must_use]
    pub fn by_id(&self, id: i32) -> Option<&BackendRef> {
        self.by_id.get(&id).map(|&index| &self.ordered[index])
    }

    /// Checks whether a backend id is registered.
    #[must_use]
    pub fn contains_id(&self, id: i32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Iterates backends in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &BackendRef> {
        self.ordered.iter()
    }

    /// Returns the declared backend names, sorted case-insensitively.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ordered.iter().map(|b| b.name().to_string()).collect();
        names.sort_by_key(|n| n.to_lowercase());
        names
    }

    /// Returns the number of registered backends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if no backend is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
