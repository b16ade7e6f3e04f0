//! Notification specs
//!
//! Structural changes are published to the bus as `{ kind, request }`.

use crate::prelude::*;
use keylock_core::events::Subscription;
use similar_asserts::assert_eq;

fn drain(rx: &mut keylock_core::events::EventReceiver) -> Vec<QueueEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn change_stream_sees_inserts_and_removals_in_order() {
    init_tracing();
    let bus = EventBus::new();
    let mut structural = bus.subscribe(Subscription::new(
        "structural",
        &["queue:insert", "queue:remove:*"],
    ));
    let mut coordinator = Coordinator::with_sink(CoordinatorConfig::new("events"), bus);

    let first = lock(&mut coordinator, "users");
    let second = lock(&mut coordinator, "users");
    coordinator.release(first.id());
    coordinator.release(second.id());

    let seen: Vec<(String, RequestId)> = drain(&mut structural)
        .into_iter()
        .map(|e| (e.name(), e.request.id))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("queue:insert".to_string(), RequestId::Seq(1)),
            ("queue:insert".to_string(), RequestId::Seq(2)),
            ("queue:remove:released".to_string(), RequestId::Seq(1)),
            ("queue:remove:released".to_string(), RequestId::Seq(2)),
        ]
    );
}

#[test]
fn every_removal_reason_is_published() {
    let bus = EventBus::new();
    let mut changes = bus.on_change();
    let mut coordinator = Coordinator::with_sink(CoordinatorConfig::default(), bus);

    let holder = lock(&mut coordinator, "a");
    let waiter = lock(&mut coordinator, "a");
    coordinator.cancel_pending(waiter.id(), None);
    coordinator.wait_until_free(["b"], &[]).unwrap();
    lock(&mut coordinator, "c");
    let mut snapshot = coordinator.export_snapshot();
    snapshot.queue.retain(|r| r.keys != ["c"]);
    coordinator.import_snapshot(snapshot).unwrap();
    coordinator.release(holder.id());

    let reasons: Vec<RemovalReason> = drain(&mut changes)
        .into_iter()
        .filter_map(|e| match e.kind {
            EventKind::Removed(reason) => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            RemovalReason::Cancelled,
            RemovalReason::AutoReleased,
            RemovalReason::ImportDropped,
            RemovalReason::Released,
        ]
    );
}

#[test]
fn payload_carries_metadata() {
    let bus = EventBus::new();
    let mut inserts = bus.subscribe(Subscription::new("inserts", &["queue:insert"]));
    let mut coordinator = Coordinator::with_sink(CoordinatorConfig::default(), bus);

    coordinator
        .request(NewRequest::key("users1").with_metadata(serde_json::json!({ "additional": "info" })))
        .unwrap();

    let event = inserts.try_recv().unwrap();
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        serde_json::json!({
            "kind": "inserted",
            "request": { "id": 1, "keys": ["users1"], "metadata": { "additional": "info" } }
        })
    );
}
