// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural events published by the coordinator

use crate::request::LockRequest;
use serde::{Deserialize, Serialize};

/// Why a request left the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    Released,
    Cancelled,
    AutoReleased,
    ImportDropped,
}

impl RemovalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalReason::Released => "released",
            RemovalReason::Cancelled => "cancelled",
            RemovalReason::AutoReleased => "auto_released",
            RemovalReason::ImportDropped => "import_dropped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Request appended to the queue
    Inserted,
    /// Pending completion resolved
    Granted,
    /// Request left the queue
    Removed(RemovalReason),
}

/// A queue change with the request it concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEvent {
    pub kind: EventKind,
    pub request: LockRequest,
}

impl QueueEvent {
    pub fn new(kind: EventKind, request: LockRequest) -> Self {
        Self { kind, request }
    }

    /// Colon-separated event name used for subscription matching
    pub fn name(&self) -> String {
        match self.kind {
            EventKind::Inserted => "queue:insert".to_string(),
            EventKind::Granted => "queue:grant".to_string(),
            EventKind::Removed(reason) => format!("queue:remove:{}", reason.as_str()),
        }
    }
}
