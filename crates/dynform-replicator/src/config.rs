//! Replicator configuration

use dynform_tree::DEFAULT_CONTAINER_CLASS;
use serde::{Deserialize, Serialize};

/// How many rows a replicator guarantees and what they are made of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicatorConfig {
    /// Rows created when the form is shown for the first time
    pub default_count: usize,
    /// Top up to `default_count` rows on submission as well
    pub force_default: bool,
    /// Class label given to created rows
    pub container_class: String,
}

impl ReplicatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default row count
    #[inline]
    #[must_use]
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    /// With forced top-up on submission
    #[inline]
    #[must_use]
    pub fn with_force_default(mut self, force: bool) -> Self {
        self.force_default = force;
        self
    }

    /// With row container class
    #[inline]
    #[must_use]
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }
}

impl Default for ReplicatorConfig {
    fn default() -> Self {
        Self {
            default_count: 0,
            force_default: false,
            container_class: DEFAULT_CONTAINER_CLASS.to_string(),
        }
    }
}
