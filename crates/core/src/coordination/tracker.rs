// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending completions keyed by request id
//!
//! An entry lives only while its request is queued and unresolved. Every
//! settle path removes it, so the tracker never holds more than the queue.

use super::completion::{Completion, Resolver};
use crate::error::LockError;
use crate::request::RequestId;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CompletionTracker {
    pending: HashMap<RequestId, Resolver>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a completion for `id`, replacing any stale entry
    pub fn register(&mut self, id: RequestId) -> Completion {
        let (tx, completion) = Completion::channel(id.clone());
        self.pending.insert(id, tx);
        completion
    }

    pub fn contains(&self, id: &RequestId) -> bool {
        self.pending.contains_key(id)
    }

    /// Resolve with the request id. Returns false if nothing was pending.
    pub fn resolve(&mut self, id: &RequestId) -> bool {
        match self.pending.remove(id) {
            Some(tx) => {
                // Receiver may already be gone; the grant still stands
                let _ = tx.send(Ok(id.clone()));
                true
            }
            None => false,
        }
    }

    /// Reject with `error`. Returns false if nothing was pending.
    pub fn reject(&mut self, id: &RequestId, error: LockError) -> bool {
        match self.pending.remove(id) {
            Some(tx) => {
                let _ = tx.send(Err(error));
                true
            }
            None => false,
        }
    }

    /// Drop the entry without settling it
    pub fn forget(&mut self, id: &RequestId) -> bool {
        self.pending.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
