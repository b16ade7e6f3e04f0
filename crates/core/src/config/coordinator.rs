// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How `import_snapshot` settles pending requests missing from the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Reject with `ImportDroppedLock`
    #[default]
    Reject,
    /// Resolve as if granted; the wait is moot
    Resolve,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Label attached to log records
    pub name: String,
    pub import_policy: ImportPolicy,
    /// Reason used when `cancel_pending` is given none
    pub wait_cancelled_reason: String,
    /// Reason used when `cancel_all` is given none
    pub all_cancelled_reason: String,
}

impl CoordinatorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_import_policy(mut self, policy: ImportPolicy) -> Self {
        self.import_policy = policy;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            import_policy: ImportPolicy::Reject,
            wait_cancelled_reason: "wait cancelled".to_string(),
            all_cancelled_reason: "all locks cancelled".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
