//! Hierarchical key specs
//!
//! A key blocks its descendants and its ancestors; siblings are independent.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn table_lock_blocks_field_lock() {
    let mut coordinator = coordinator();
    let table = lock(&mut coordinator, "users");
    let mut field = lock(&mut coordinator, "users.email");

    assert!(!is_granted(&mut field));
    coordinator.release(table.id());
    assert!(is_granted(&mut field));
}

#[test]
fn field_lock_blocks_table_lock() {
    let mut coordinator = coordinator();
    let field = lock(&mut coordinator, "users.email");
    let mut table = lock(&mut coordinator, "users");

    assert!(!is_granted(&mut table));
    coordinator.release(field.id());
    assert!(is_granted(&mut table));
}

#[test]
fn sibling_fields_proceed_together() {
    let mut coordinator = coordinator();
    let mut email = lock(&mut coordinator, "users.email");
    let mut name = lock(&mut coordinator, "users.name");

    assert!(is_granted(&mut email));
    assert!(is_granted(&mut name));
}

#[test]
fn shared_text_prefix_is_not_hierarchy() {
    let mut coordinator = coordinator();
    let mut users = lock(&mut coordinator, "users");
    let mut users2 = lock(&mut coordinator, "users2");

    assert!(is_granted(&mut users));
    assert!(is_granted(&mut users2));
}

#[test]
fn multi_key_request_is_atomic() {
    let mut coordinator = coordinator();
    let users = lock(&mut coordinator, "users.email");
    let mut both = coordinator
        .request(NewRequest::new(["orders", "users"]))
        .unwrap();
    let mut orders_total = lock(&mut coordinator, "orders.total");

    // orders is free, but the request holds nothing until users is free too
    assert!(!is_granted(&mut both));
    assert!(!is_granted(&mut orders_total));

    coordinator.release(users.id());
    assert!(is_granted(&mut both));
    assert!(!is_granted(&mut orders_total));
}

#[tokio::test]
async fn wait_until_free_covers_descendants() {
    let mut coordinator = coordinator();
    let field = lock(&mut coordinator, "users.email");
    let wait = coordinator.wait_until_free(["users"], &[]).unwrap();

    coordinator.release(field.id());

    within(wait).await.unwrap();
    assert!(coordinator.is_empty());
}

#[test]
fn holder_can_wait_past_its_own_lock() {
    let mut coordinator = coordinator();
    let own = lock(&mut coordinator, "users");
    let mut wait = coordinator
        .wait_until_free(["users"], &[own.id().clone()])
        .unwrap();

    assert_eq!(wait.try_result(), Some(Ok(())));
    assert_eq!(ids(coordinator.active_for("users")), vec![own.id().clone()]);
}
