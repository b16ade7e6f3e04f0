// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FIFO coordinator for hierarchical lock requests
//!
//! Owns the queue, the id counter and the pending completions. Every
//! structural change is followed by a sync pass that grants whatever the
//! matcher now reports active, in queue order.

use super::completion::{Completion, WaitCompletion};
use super::matcher;
use super::tracker::CompletionTracker;
use crate::config::CoordinatorConfig;
use crate::error::{CoordinatorError, LockError};
use crate::events::{EventKind, EventSink, NoopSink, QueueEvent, RemovalReason};
use crate::request::{LockRequest, NewRequest, RequestId};
use tracing::{debug, info};

pub struct Coordinator {
    pub(crate) config: CoordinatorConfig,
    pub(crate) queue: Vec<LockRequest>,
    pub(crate) counter: u64,
    pub(crate) tracker: CompletionTracker,
    sink: Box<dyn EventSink>,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("name", &self.config.name)
            .field("queue", &self.queue)
            .field("counter", &self.counter)
            .field("pending", &self.tracker.len())
            .finish()
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::with_sink(config, NoopSink)
    }

    /// Create a coordinator that publishes queue events to `sink`
    pub fn with_sink(config: CoordinatorConfig, sink: impl EventSink + 'static) -> Self {
        Self {
            config,
            queue: Vec::new(),
            counter: 0,
            tracker: CompletionTracker::new(),
            sink: Box::new(sink),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    // === Requests ===

    /// Queue a request and return its completion
    ///
    /// The completion resolves with the request id once nothing earlier in
    /// the queue conflicts with any of its keys. If that is already true, it
    /// is resolved before this returns.
    pub fn request(&mut self, new: NewRequest) -> Result<Completion, CoordinatorError> {
        if new.keys.is_empty() {
            return Err(CoordinatorError::EmptyKeys);
        }

        let id = match new.id.clone() {
            Some(id) if self.contains(&id) => return Err(CoordinatorError::DuplicateId(id)),
            Some(id) => id,
            None => self.next_id()?,
        };

        let request = new.into_request(id.clone());
        debug!(
            coordinator = %self.config.name,
            %id,
            keys = ?request.keys,
            auto_release = request.auto_release,
            "lock requested"
        );

        self.queue.push(request.clone());
        let completion = self.tracker.register(id);
        self.publish(EventKind::Inserted, request);
        self.sync();

        Ok(completion)
    }

    /// Wait until no earlier, non-ignored request conflicts with `keys`
    ///
    /// Queues an auto-release request: it leaves the queue the moment it
    /// becomes active, so it never holds the keys.
    pub fn wait_until_free<I, K>(
        &mut self,
        keys: I,
        ignore: &[RequestId],
    ) -> Result<WaitCompletion, CoordinatorError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let new = NewRequest::new(keys)
            .with_ignore(ignore.iter().cloned())
            .with_auto_release(true);
        self.request(new).map(WaitCompletion::new)
    }

    /// Remove a request whether or not it was granted
    ///
    /// A still-pending completion is dropped rather than rejected; its
    /// holder sees `LockError::Abandoned`. Unknown ids return false.
    pub fn release(&mut self, id: &RequestId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let request = self.queue.remove(index);
        self.tracker.forget(id);
        debug!(coordinator = %self.config.name, %id, "lock released");
        self.publish(EventKind::Removed(RemovalReason::Released), request);
        self.sync();

        true
    }

    /// Withdraw a request that has not been granted yet
    ///
    /// Rejects its completion with `WaitCancelled` and removes it. Returns
    /// false, changing nothing, if the request was already granted or is
    /// unknown.
    pub fn cancel_pending(&mut self, id: &RequestId, reason: Option<&str>) -> bool {
        if !self.tracker.contains(id) {
            return false;
        }

        let reason = reason
            .map(str::to_string)
            .unwrap_or_else(|| self.config.wait_cancelled_reason.clone());
        debug!(coordinator = %self.config.name, %id, %reason, "wait cancelled");
        self.tracker.reject(
            id,
            LockError::WaitCancelled {
                id: id.clone(),
                reason,
            },
        );

        if let Some(index) = self.position(id) {
            let request = self.queue.remove(index);
            self.publish(EventKind::Removed(RemovalReason::Cancelled), request);
        }
        self.sync();

        true
    }

    /// Reject every pending completion and empty the queue
    ///
    /// Returns how many completions were rejected. Granted requests are
    /// removed as well, without an error.
    pub fn cancel_all(&mut self, reason: Option<&str>) -> usize {
        if self.queue.is_empty() {
            return 0;
        }

        let reason = reason
            .map(str::to_string)
            .unwrap_or_else(|| self.config.all_cancelled_reason.clone());
        let drained = std::mem::take(&mut self.queue);
        let mut rejected = 0;

        for request in drained {
            let error = LockError::AllCancelled {
                id: request.id.clone(),
                reason: reason.clone(),
            };
            if self.tracker.reject(&request.id, error) {
                rejected += 1;
            }
            self.publish(EventKind::Removed(RemovalReason::Cancelled), request);
        }

        info!(coordinator = %self.config.name, rejected, %reason, "all locks cancelled");
        rejected
    }

    // === Queries ===

    /// Active requests with a key starting with `key_prefix`
    ///
    /// This is a plain string prefix: `"user"` finds holders of `"users"`.
    pub fn active_for(&self, key_prefix: &str) -> Vec<LockRequest> {
        self.queue
            .iter()
            .filter(|r| r.has_key_prefix(key_prefix))
            .filter(|r| matcher::is_active(&self.queue, r))
            .cloned()
            .collect()
    }

    /// Queued requests in arrival order
    pub fn queue(&self) -> &[LockRequest] {
        &self.queue
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn get(&self, id: &RequestId) -> Option<&LockRequest> {
        self.queue.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RequestId) -> bool {
        self.position(id).is_some()
    }

    /// True if the request is queued and currently holds its keys
    pub fn is_active(&self, id: &RequestId) -> bool {
        self.get(id)
            .is_some_and(|r| matcher::is_active(&self.queue, r))
    }

    /// True if the request still has an unsettled completion
    pub fn is_pending(&self, id: &RequestId) -> bool {
        self.tracker.contains(id)
    }

    pub fn pending_count(&self) -> usize {
        self.tracker.len()
    }

    // === Internals ===

    fn position(&self, id: &RequestId) -> Option<usize> {
        self.queue.iter().position(|r| &r.id == id)
    }

    /// Next counter value not currently used by a queued request
    ///
    /// The counter is left unchanged when it cannot advance.
    fn next_id(&mut self) -> Result<RequestId, CoordinatorError> {
        let mut next = self.counter;
        loop {
            next = next
                .checked_add(1)
                .ok_or(CoordinatorError::CounterExhausted)?;
            let id = RequestId::Seq(next);
            if !self.contains(&id) {
                self.counter = next;
                return Ok(id);
            }
        }
    }

    pub(crate) fn publish(&self, kind: EventKind, request: LockRequest) {
        self.sink.publish(QueueEvent::new(kind, request));
    }

    /// Grant everything now active, repeating while auto-release requests
    /// leave the queue
    ///
    /// Each round resolves active requests in queue order and removes at
    /// most one auto-release request. A round without a removal ends the
    /// pass, so there are at most `len + 1` rounds. Returns the ids granted.
    pub(crate) fn sync(&mut self) -> Vec<RequestId> {
        let mut granted = Vec::new();
        let max_rounds = self.queue.len() + 1;

        for _ in 0..max_rounds {
            let mut auto_released = None;

            for (index, request) in self.queue.iter().enumerate() {
                if !matcher::is_active(&self.queue, request) {
                    continue;
                }

                if self.tracker.resolve(&request.id) {
                    debug!(coordinator = %self.config.name, id = %request.id, "lock granted");
                    self.sink
                        .publish(QueueEvent::new(EventKind::Granted, request.clone()));
                    granted.push(request.id.clone());
                }

                if request.auto_release {
                    auto_released = Some(index);
                    break;
                }
            }

            let Some(index) = auto_released else {
                break;
            };
            let request = self.queue.remove(index);
            debug!(coordinator = %self.config.name, id = %request.id, "wait satisfied");
            self.publish(EventKind::Removed(RemovalReason::AutoReleased), request);
        }

        granted
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
