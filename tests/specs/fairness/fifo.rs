//! FIFO fairness specs
//!
//! Requests for the same key are granted strictly in arrival order.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn release_hands_lock_to_next_request() {
    let mut coordinator = coordinator();
    let mut r1 = lock(&mut coordinator, "a");
    let mut r2 = lock(&mut coordinator, "a");

    assert_eq!(r1.try_result(), Some(Ok(RequestId::Seq(1))));
    assert!(r2.try_result().is_none());

    coordinator.release(r1.id());

    assert_eq!(r2.try_result(), Some(Ok(RequestId::Seq(2))));
    assert_eq!(ids(coordinator.active_for("a")), vec![RequestId::Seq(2)]);
}

#[test]
fn later_request_never_overtakes() {
    let mut coordinator = coordinator();
    let first = lock(&mut coordinator, "users");
    let mut second = lock(&mut coordinator, "users");
    let mut third = lock(&mut coordinator, "users");

    coordinator.release(first.id());
    assert!(is_granted(&mut second));
    assert!(!is_granted(&mut third));

    coordinator.release(second.id());
    assert!(is_granted(&mut third));
}

#[tokio::test]
async fn four_waiters_run_one_at_a_time() {
    init_tracing();
    let shared = SharedCoordinator::new(Coordinator::default());
    let order = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut tasks = Vec::new();

    for n in 0..4u64 {
        let handle = shared.request(NewRequest::key("users")).unwrap();
        let shared = shared.clone();
        let order = order.clone();
        tasks.push(tokio::spawn(async move {
            let id = handle.await.unwrap();
            order.lock().unwrap().push(n);
            tokio::time::sleep(Duration::from_millis(5)).await;
            shared.release(&id);
        }));
    }

    for task in tasks {
        within(task).await.unwrap();
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn custom_id_participates_in_order() {
    let mut coordinator = coordinator();
    let mut named = coordinator
        .request(NewRequest::key("users").with_id("baz"))
        .unwrap();
    let mut next = lock(&mut coordinator, "users");

    assert_eq!(named.try_result(), Some(Ok(RequestId::named("baz"))));
    assert!(!is_granted(&mut next));

    assert!(coordinator.release(&RequestId::named("baz")));
    assert!(is_granted(&mut next));
}

#[test]
fn releasing_unknown_id_is_not_an_error() {
    let mut coordinator = coordinator();
    assert!(!coordinator.release(&RequestId::named("not found")));
}
