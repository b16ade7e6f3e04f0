// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hierarchical lock coordination
//!
//! This module provides:
//! - **matcher** - Decides whether a queued request holds its keys
//! - **CompletionTracker** - Pending completions keyed by request id
//! - **Coordinator** - FIFO queue with grant, release and cancellation
//! - **Snapshot** - Wholesale export and import of coordinator state
//! - **SharedCoordinator** - Mutex-serialized handle for multi-task use

mod completion;
mod coordinator;
pub mod matcher;
mod shared;
mod snapshot;
mod tracker;

pub use completion::{Completion, Outcome, WaitCompletion};
pub use coordinator::Coordinator;
pub use shared::{CancellableCompletion, CancellableWait, SharedCoordinator};
pub use snapshot::{ImportReport, Snapshot};
pub use tracker::CompletionTracker;
