#![forbid(unsafe_code)]

//! Driver configuration.
//!
//! ```toml
//! track_dirty = true
//! max_indirection_depth = 8
//! empty_path_writes = "ignore"
//! ```
//!
//! ```rust,ignore
//! let config = DriverConfig::from_toml_str(text)?;
//! let driver = EditorDriver::with_config(plan, config);
//! ```
//!
//! Loading requires the `config` feature. Every field has a default, so a
//! partial document only overrides what it names.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What `flush` does when an editor bound to the empty path yields an
/// object other than the one it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum EmptyPathPolicy {
    /// Fail the flush with a binding error.
    #[default]
    Reject,
    /// Skip the write and log a warning.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DriverConfig {
    /// Snapshot leaf values after each edit so `is_dirty` can compare
    /// against them. When off, edit performs no leaf reads.
    pub track_dirty: bool,

    /// How many `as_is_editor` hops are followed from one slot.
    pub max_indirection_depth: usize,

    pub empty_path_writes: EmptyPathPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            track_dirty: true,
            max_indirection_depth: 8,
            empty_path_writes: EmptyPathPolicy::Reject,
        }
    }
}

impl DriverConfig {
    #[must_use]
    pub fn with_track_dirty(mut self, track_dirty: bool) -> Self {
        self.track_dirty = track_dirty;
        self
    }

    #[must_use]
    pub fn with_max_indirection_depth(mut self, depth: usize) -> Self {
        self.max_indirection_depth = depth;
        self
    }

    #[must_use]
    pub fn with_empty_path_writes(mut self, policy: EmptyPathPolicy) -> Self {
        self.empty_path_writes = policy;
        self
    }

    /// Check parameter ranges. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_indirection_depth == 0 {
            errors.push("max_indirection_depth must be at least 1".to_string());
        }
        errors
    }

    /// Replace every out-of-range field with its default, logging each
    /// problem [`validate`](Self::validate) reports.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let errors = self.validate();
        if errors.is_empty() {
            return self;
        }
        for error in &errors {
            warn!(%error, "invalid driver config, using default");
        }
        let defaults = Self::default();
        if self.max_indirection_depth == 0 {
            self.max_indirection_depth = defaults.max_indirection_depth;
        }
        self
    }

    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }
}

/// Failure loading a [`DriverConfig`].
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
}
