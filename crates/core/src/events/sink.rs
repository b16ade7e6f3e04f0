// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish capability handed to the coordinator

use super::event::QueueEvent;

/// Receives queue events. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: QueueEvent);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, _event: QueueEvent) {}
}
