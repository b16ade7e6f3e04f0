// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue change notifications
//!
//! This module provides:
//! - `QueueEvent` - What changed, and the request it happened to
//! - `EventSink` - The publish capability the coordinator depends on
//! - `EventBus` - Route events to matching subscribers using patterns

mod bus;
mod event;
mod sink;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use event::{EventKind, QueueEvent, RemovalReason};
pub use sink::{EventSink, NoopSink};
pub use subscription::{EventPattern, SubscriberId, Subscription};
