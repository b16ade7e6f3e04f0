//! keylock-core: FIFO coordination of hierarchical resource keys
//!
//! This crate provides:
//! - A matcher deciding which queued requests hold their dotted keys
//! - A coordinator granting requests in arrival order
//! - Snapshot export/import for recovery and replication
//! - An event bus for observing queue changes

pub mod config;
pub mod coordination;
pub mod error;
pub mod events;
pub mod request;

pub use config::{CoordinatorConfig, ImportPolicy};
pub use coordination::{
    CancellableCompletion, CancellableWait, Completion, CompletionTracker, Coordinator,
    ImportReport, Outcome, SharedCoordinator, Snapshot, WaitCompletion,
};
pub use error::{ConfigError, CoordinatorError, LockError};
pub use events::{EventBus, EventKind, EventSink, NoopSink, QueueEvent, RemovalReason};
pub use request::{LockRequest, NewRequest, RequestId};
