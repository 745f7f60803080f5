//! Backend configuration.
//!
//! Identity of a backend inside one store: its numeric id (encoded into
//! every unique entity id), its name (used by callers to address it) and its
//! priority (lower is preferred).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, BackendResult};

/// Base configuration shared by all backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Numeric id, unique within one store.
    pub id: i32,

    /// Display name, unique (case-insensitive) within one store.
    pub name: String,

    /// Priority for default routing and authentication order (lower = higher priority).
    #[serde(default)]
    pub priority: i32,

    /// Whether the backend is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Backend-specific configuration.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

fn default_enabled() -> bool {
    true
}

impl BackendConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> BackendConfigBuilder {
        BackendConfigBuilder::new()
    }

    /// Gets a property by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Gets a property as bool.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.properties.get(key).and_then(|v| v.parse().ok())
    }

    /// Gets a property as i32.
    #[must_use]
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.properties.get(key).and_then(|v| v.parse().ok())
    }
}

/// Builder for [`BackendConfig`].
#[derive(Debug, Default)]
pub struct BackendConfigBuilder {
    id: i32,
    name: Option<String>,
    priority: i32,
    enabled: bool,
    properties: HashMap<String, String>,
}

impl BackendConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Sets the id.
    #[must_use]
    pub const fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether the backend is enabled.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Builds the configuration.
    ///
    /// ## Errors
    ///
    /// Returns `BackendError::Configuration` if the name is missing or blank.
    pub fn build(self) -> BackendResult<BackendConfig> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| BackendError::config("backend name is required"))?;

        Ok(BackendConfig {
            id: self.id,
            name,
            priority: self.priority,
            enabled: self.enabled,
            properties: self.properties,
        })
    }
}
