// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lock coordination

use crate::request::RequestId;
use thiserror::Error;

/// Why a completion did not resolve with a grant
///
/// Delivered through the completion handle of the affected request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("wait on {id} cancelled: {reason}")]
    WaitCancelled { id: RequestId, reason: String },
    #[error("lock {id} cancelled: {reason}")]
    AllCancelled { id: RequestId, reason: String },
    #[error("imported state did not hold lock {id}")]
    ImportDroppedLock { id: RequestId },
    /// The request left the queue, or the coordinator was dropped, before
    /// the request was granted
    ///
    /// Releasing your own still-pending request also surfaces here: the
    /// completion is dropped without a grant, so awaiting it yields this
    /// error rather than staying pending forever.
    #[error("lock {id} abandoned before it was granted")]
    Abandoned { id: RequestId },
}

impl LockError {
    /// Id of the request this error belongs to
    pub fn id(&self) -> &RequestId {
        match self {
            LockError::WaitCancelled { id, .. }
            | LockError::AllCancelled { id, .. }
            | LockError::ImportDroppedLock { id }
            | LockError::Abandoned { id } => id,
        }
    }

    /// True for errors caused by an explicit withdrawal
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            LockError::WaitCancelled { .. } | LockError::AllCancelled { .. }
        )
    }
}

/// Errors returned synchronously by coordinator operations
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("lock request must name at least one key")]
    EmptyKeys,
    #[error("request id already queued: {0}")]
    DuplicateId(RequestId),
    /// The id counter is at `u64::MAX`; only caller-supplied ids remain
    #[error("request id counter exhausted")]
    CounterExhausted,
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Errors loading coordinator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
