// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion handles returned to lock requesters
//!
//! A completion settles exactly once: with the request id when the request
//! is granted, or with a [`LockError`] when it is withdrawn.

use crate::error::LockError;
use crate::request::RequestId;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Result delivered through a completion
pub type Outcome = Result<RequestId, LockError>;

/// Sending half kept by the completion tracker
pub(crate) type Resolver = oneshot::Sender<Outcome>;

/// Pending grant for a lock request
#[derive(Debug)]
pub struct Completion {
    id: RequestId,
    rx: oneshot::Receiver<Outcome>,
    settled: Option<Outcome>,
}

impl Completion {
    pub(crate) fn channel(id: RequestId) -> (Resolver, Completion) {
        let (tx, rx) = oneshot::channel();
        (
            tx,
            Completion {
                id,
                rx,
                settled: None,
            },
        )
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// Outcome if already settled, without waiting
    pub fn try_result(&mut self) -> Option<Outcome> {
        if self.settled.is_none() {
            let outcome = match self.rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => Err(LockError::Abandoned {
                    id: self.id.clone(),
                }),
            };
            self.settled = Some(outcome);
        }
        self.settled.clone()
    }

    /// True while the request has neither been granted nor withdrawn
    pub fn is_pending(&mut self) -> bool {
        self.try_result().is_none()
    }
}

impl Future for Completion {
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if let Some(outcome) = &this.settled {
            return Poll::Ready(outcome.clone());
        }

        let outcome = match Pin::new(&mut this.rx).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(Ok(outcome)) => outcome,
            Poll::Ready(Err(_)) => Err(LockError::Abandoned {
                id: this.id.clone(),
            }),
        };
        this.settled = Some(outcome.clone());
        Poll::Ready(outcome)
    }
}

/// Completion of a one-shot wait; settles with `()` once the keys are free
#[derive(Debug)]
pub struct WaitCompletion {
    inner: Completion,
}

impl WaitCompletion {
    pub(crate) fn new(inner: Completion) -> Self {
        Self { inner }
    }

    /// Id of the auto-release request backing this wait
    pub fn id(&self) -> &RequestId {
        self.inner.id()
    }

    pub fn try_result(&mut self) -> Option<Result<(), LockError>> {
        self.inner.try_result().map(|r| r.map(|_| ()))
    }

    pub fn is_pending(&mut self) -> bool {
        self.inner.is_pending()
    }
}

impl Future for WaitCompletion {
    type Output = Result<(), LockError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().inner)
            .poll(cx)
            .map(|r| r.map(|_| ()))
    }
}
