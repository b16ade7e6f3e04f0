// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus routing queue events to subscribers

use super::event::QueueEvent;
use super::sink::EventSink;
use super::subscription::{SubscriberId, Subscription};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

pub type EventSender = mpsc::UnboundedSender<QueueEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<QueueEvent>;

/// Routes each published event to every subscription whose patterns match
///
/// Channels are unbounded so publishing never waits on a slow consumer.
/// Clones share subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<SubscriberId, (Subscription, EventSender)>>>,
    /// Receives every event regardless of patterns
    change_handler: Arc<RwLock<Option<EventSender>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events matching the subscription's patterns
    ///
    /// Subscribing again with the same id replaces the earlier channel.
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = subscription.id.clone();

        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.insert(id, (subscription, tx));

        rx
    }

    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.remove(id).is_some()
    }

    /// Install the change handler, which sees every event
    pub fn on_change(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut handler = self
            .change_handler
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *handler = Some(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Drop subscriptions whose receivers have gone away
    pub fn prune_closed(&self) -> usize {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        let before = subs.len();
        subs.retain(|_, (_, tx)| !tx.is_closed());
        before - subs.len()
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: QueueEvent) {
        let event_name = event.name();

        if let Some(tx) = self
            .change_handler
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            let _ = tx.send(event.clone());
        }

        let subs = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
        for (subscription, tx) in subs.values() {
            if subscription.matches(&event_name) {
                let _ = tx.send(event.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
