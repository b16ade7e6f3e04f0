// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock requests and their identifiers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a queued lock request
///
/// Auto-assigned ids come from the coordinator counter and serialize as JSON
/// numbers; caller-supplied ids may be numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Seq(u64),
    Named(String),
}

impl RequestId {
    pub fn named(id: impl Into<String>) -> Self {
        Self::Named(id.into())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Seq(n) => write!(f, "{}", n),
            RequestId::Named(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for RequestId {
    fn from(n: u64) -> Self {
        Self::Seq(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::Named(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self::Named(s)
    }
}

/// A queued ask for exclusive access to one or more keys
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LockRequest {
    pub id: RequestId,
    /// Dot-structured resource keys, all granted together
    pub keys: Vec<String>,
    /// Requests that never block this one
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub ignore: BTreeSet<RequestId>,
    /// Dequeue as soon as the request becomes active
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_release: bool,
    /// Opaque caller payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl LockRequest {
    /// True if any key of this request starts with `prefix`
    pub fn has_key_prefix(&self, prefix: &str) -> bool {
        self.keys.iter().any(|k| k.starts_with(prefix))
    }

    pub fn ignores(&self, id: &RequestId) -> bool {
        self.ignore.contains(id)
    }
}

/// Parameters for a new lock request
///
/// The id is optional; the coordinator assigns one from its counter when
/// none is given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewRequest {
    pub keys: Vec<String>,
    pub id: Option<RequestId>,
    pub ignore: BTreeSet<RequestId>,
    pub auto_release: bool,
    pub metadata: Option<serde_json::Value>,
}

impl NewRequest {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Request a single key
    pub fn key(key: impl Into<String>) -> Self {
        Self::new([key.into()])
    }

    pub fn with_id(mut self, id: impl Into<RequestId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_ignore<I, R>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RequestId>,
    {
        self.ignore.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_auto_release(mut self, auto_release: bool) -> Self {
        self.auto_release = auto_release;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn into_request(self, id: RequestId) -> LockRequest {
        LockRequest {
            id,
            keys: self.keys,
            ignore: self.ignore,
            auto_release: self.auto_release,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
