// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator shared across tasks and threads
//!
//! The coordinator itself is single-flow: every operation takes `&mut self`
//! and runs to completion. `SharedCoordinator` serializes access behind a
//! mutex; the lock is never held across an await.

use super::completion::{Completion, Outcome, WaitCompletion};
use super::coordinator::Coordinator;
use super::snapshot::{ImportReport, Snapshot};
use crate::error::{CoordinatorError, LockError};
use crate::request::{LockRequest, NewRequest, RequestId};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::task::{Context, Poll};

#[derive(Clone, Debug)]
pub struct SharedCoordinator {
    inner: Arc<Mutex<Coordinator>>,
}

impl SharedCoordinator {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(coordinator)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Coordinator> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` with exclusive access to the coordinator
    pub fn with<R>(&self, f: impl FnOnce(&mut Coordinator) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn request(&self, new: NewRequest) -> Result<CancellableCompletion, CoordinatorError> {
        let completion = self.lock().request(new)?;
        Ok(CancellableCompletion {
            completion,
            coordinator: Arc::downgrade(&self.inner),
        })
    }

    /// Wait until `keys` are free; settles with `()` like
    /// [`Coordinator::wait_until_free`]
    pub fn wait_until_free<I, K>(
        &self,
        keys: I,
        ignore: &[RequestId],
    ) -> Result<CancellableWait, CoordinatorError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let wait = self.lock().wait_until_free(keys, ignore)?;
        Ok(CancellableWait {
            wait,
            coordinator: Arc::downgrade(&self.inner),
        })
    }

    pub fn release(&self, id: &RequestId) -> bool {
        self.lock().release(id)
    }

    pub fn cancel_pending(&self, id: &RequestId, reason: Option<&str>) -> bool {
        self.lock().cancel_pending(id, reason)
    }

    pub fn cancel_all(&self, reason: Option<&str>) -> usize {
        self.lock().cancel_all(reason)
    }

    pub fn active_for(&self, key_prefix: &str) -> Vec<LockRequest> {
        self.lock().active_for(key_prefix)
    }

    pub fn export_snapshot(&self) -> Snapshot {
        self.lock().export_snapshot()
    }

    pub fn import_snapshot(&self, snapshot: Snapshot) -> Result<ImportReport, CoordinatorError> {
        self.lock().import_snapshot(snapshot)
    }
}

/// Completion that can withdraw its own request
///
/// Holds only a weak reference, so an outstanding handle does not keep the
/// coordinator alive.
#[derive(Debug)]
pub struct CancellableCompletion {
    completion: Completion,
    coordinator: Weak<Mutex<Coordinator>>,
}

impl CancellableCompletion {
    pub fn id(&self) -> &RequestId {
        self.completion.id()
    }

    pub fn try_result(&mut self) -> Option<Outcome> {
        self.completion.try_result()
    }

    /// Reject the request with `WaitCancelled` if it is still pending
    ///
    /// Returns false if it was already granted or the coordinator is gone.
    pub fn cancel(&self, reason: Option<&str>) -> bool {
        cancel_through(&self.coordinator, self.completion.id(), reason)
    }
}

impl Future for CancellableCompletion {
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().completion).poll(cx)
    }
}

/// Wait handle that can withdraw its own auto-release request
#[derive(Debug)]
pub struct CancellableWait {
    wait: WaitCompletion,
    coordinator: Weak<Mutex<Coordinator>>,
}

impl CancellableWait {
    /// Id of the auto-release request backing this wait
    pub fn id(&self) -> &RequestId {
        self.wait.id()
    }

    pub fn try_result(&mut self) -> Option<Result<(), LockError>> {
        self.wait.try_result()
    }

    /// Stop waiting; settles with `WaitCancelled` if the keys were not free
    pub fn cancel(&self, reason: Option<&str>) -> bool {
        cancel_through(&self.coordinator, self.wait.id(), reason)
    }
}

impl Future for CancellableWait {
    type Output = Result<(), LockError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().wait).poll(cx)
    }
}

fn cancel_through(
    coordinator: &Weak<Mutex<Coordinator>>,
    id: &RequestId,
    reason: Option<&str>,
) -> bool {
    match coordinator.upgrade() {
        Some(inner) => inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cancel_pending(id, reason),
        None => false,
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
