//! Snapshot specs
//!
//! Exported state can be shipped as JSON and imported elsewhere; completions
//! follow their request ids across imports.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn export_import_roundtrip_changes_nothing() {
    let mut coordinator = coordinator();
    let mut holder = lock(&mut coordinator, "users");
    let mut waiter = lock(&mut coordinator, "users.email");
    let before = coordinator.export_snapshot();

    let report = coordinator.import_snapshot(before.clone()).unwrap();

    assert!(report.dropped.is_empty());
    assert_eq!(coordinator.export_snapshot(), before);
    assert!(is_granted(&mut holder));
    assert!(waiter.try_result().is_none());
}

#[test]
fn snapshot_survives_json_transport() {
    let mut primary = coordinator();
    lock(&mut primary, "users");
    primary
        .request(
            NewRequest::new(["orders", "users.email"])
                .with_id("batch")
                .with_metadata(serde_json::json!({ "owner": "importer" })),
        )
        .unwrap();

    let wire = primary.export_snapshot().to_json().unwrap();
    let mut replica = coordinator();
    replica.import_snapshot(Snapshot::from_json(&wire).unwrap()).unwrap();

    assert_eq!(replica.export_snapshot(), primary.export_snapshot());
    assert_eq!(ids(replica.active_for("users")), vec![RequestId::Seq(1)]);
    assert!(!replica.is_active(&RequestId::named("batch")));
    assert_eq!(replica.counter(), 1);
}

#[tokio::test]
async fn dropped_pending_request_rejects_by_default() {
    let mut coordinator = coordinator();
    let _holder = lock(&mut coordinator, "a");
    let waiter = lock(&mut coordinator, "a");

    coordinator
        .import_snapshot(Snapshot {
            queue: Vec::new(),
            counter: 2,
        })
        .unwrap();

    assert_eq!(
        within(waiter).await,
        Err(LockError::ImportDroppedLock {
            id: RequestId::Seq(2)
        })
    );
}

#[tokio::test]
async fn resolve_policy_concedes_dropped_requests() {
    init_tracing();
    let config = CoordinatorConfig::new("replica").with_import_policy(ImportPolicy::Resolve);
    let mut coordinator = Coordinator::new(config);
    let _holder = lock(&mut coordinator, "a");
    let waiter = lock(&mut coordinator, "a");

    coordinator.import_snapshot(Snapshot::default()).unwrap();

    assert_eq!(within(waiter).await, Ok(RequestId::Seq(2)));
}

#[tokio::test]
async fn import_that_removes_holder_grants_waiter() {
    let mut coordinator = coordinator();
    let holder = lock(&mut coordinator, "a");
    let waiter = lock(&mut coordinator, "a");

    let mut snapshot = coordinator.export_snapshot();
    snapshot.queue.retain(|r| &r.id != holder.id());
    let report = coordinator.import_snapshot(snapshot).unwrap();

    assert_eq!(report.dropped, vec![RequestId::Seq(1)]);
    assert_eq!(report.granted, vec![RequestId::Seq(2)]);
    assert_eq!(within(waiter).await, Ok(RequestId::Seq(2)));
}

#[test]
fn invalid_snapshot_is_refused() {
    let mut coordinator = coordinator();
    let mut holder = lock(&mut coordinator, "a");

    let err = coordinator
        .import_snapshot(Snapshot::from_json(r#"{"queue":[{"id":1,"keys":[]}],"counter":1}"#).unwrap())
        .unwrap_err();

    assert!(matches!(err, CoordinatorError::EmptyKeys));
    assert!(is_granted(&mut holder));
    assert_eq!(coordinator.len(), 1);
}
