// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot export and import
//!
//! A snapshot is the complete coordinator state: the queue in arrival order
//! and the id counter. Importing one replaces both wholesale while keeping
//! completions attached to requests whose ids survive.

use super::coordinator::Coordinator;
use crate::config::ImportPolicy;
use crate::error::{CoordinatorError, LockError};
use crate::events::{EventKind, RemovalReason};
use crate::request::{LockRequest, RequestId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

/// Serializable coordinator state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub queue: Vec<LockRequest>,
    pub counter: u64,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, CoordinatorError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoordinatorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the queue invariants: non-empty keys and unique ids
    pub fn validate(&self) -> Result<(), CoordinatorError> {
        let mut seen = HashSet::new();
        for request in &self.queue {
            if request.keys.is_empty() {
                return Err(CoordinatorError::EmptyKeys);
            }
            if !seen.insert(&request.id) {
                return Err(CoordinatorError::DuplicateId(request.id.clone()));
            }
        }
        Ok(())
    }
}

/// What an import changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Previously queued ids absent from the snapshot
    pub dropped: Vec<RequestId>,
    /// Pending completions resolved by the post-import sync
    pub granted: Vec<RequestId>,
}

impl Coordinator {
    /// Deep copy of the queue and counter
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            queue: self.queue.clone(),
            counter: self.counter,
        }
    }

    /// Replace the queue and counter with `snapshot`
    ///
    /// Pending requests missing from the snapshot are settled according to
    /// the configured [`ImportPolicy`]. Completions of requests present in
    /// both stay attached, matched by id, and are granted if the new queue
    /// makes them active. An invalid snapshot leaves state untouched.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<ImportReport, CoordinatorError> {
        snapshot.validate()?;

        let incoming: HashSet<RequestId> = snapshot.queue.iter().map(|r| r.id.clone()).collect();
        let previous = std::mem::replace(&mut self.queue, snapshot.queue);
        self.counter = snapshot.counter;

        let mut dropped = Vec::new();
        for request in previous {
            if incoming.contains(&request.id) {
                continue;
            }

            let id = request.id.clone();
            let settled = match self.config.import_policy {
                ImportPolicy::Reject => self
                    .tracker
                    .reject(&id, LockError::ImportDroppedLock { id: id.clone() }),
                ImportPolicy::Resolve => self.tracker.resolve(&id),
            };
            if settled {
                warn!(
                    coordinator = %self.config.name,
                    %id,
                    policy = ?self.config.import_policy,
                    "imported state dropped a pending lock"
                );
            }

            self.publish(EventKind::Removed(RemovalReason::ImportDropped), request);
            dropped.push(id);
        }

        info!(
            coordinator = %self.config.name,
            queued = self.queue.len(),
            counter = self.counter,
            dropped = dropped.len(),
            "snapshot imported"
        );

        let granted = self.sync();
        Ok(ImportReport { dropped, granted })
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
