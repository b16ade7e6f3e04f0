// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hierarchical key matching
//!
//! Keys are dot-structured: `"users"` contains `"users.email"`. A request is
//! active when no earlier, non-ignored request in the queue holds a key that
//! conflicts with any of its own.

use crate::request::LockRequest;

/// True if `held` is `key` or a dotted ancestor of it
pub fn covers(held: &str, key: &str) -> bool {
    match key.strip_prefix(held) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// True if two keys name overlapping resources, in either direction
pub fn keys_conflict(a: &str, b: &str) -> bool {
    covers(a, b) || covers(b, a)
}

/// True if any key of `a` conflicts with any key of `b`
pub fn requests_conflict(a: &LockRequest, b: &LockRequest) -> bool {
    a.keys
        .iter()
        .any(|ak| b.keys.iter().any(|bk| keys_conflict(ak, bk)))
}

/// Decide whether `candidate` currently holds every key it asked for
///
/// Scans `queue` in arrival order. Entries listed in the candidate's ignore
/// set are skipped. Reaching the candidate itself means nothing earlier
/// blocks it. A candidate that is not queued is reported active.
pub fn is_active(queue: &[LockRequest], candidate: &LockRequest) -> bool {
    for entry in queue {
        if candidate.ignores(&entry.id) {
            continue;
        }

        if entry.id == candidate.id {
            return true;
        }

        if requests_conflict(entry, candidate) {
            return false;
        }
    }

    true
}

/// First request holding `key` exactly or through an ancestor key
pub fn find_covering<'a>(requests: &'a [LockRequest], key: &str) -> Option<&'a LockRequest> {
    requests
        .iter()
        .find(|r| r.keys.iter().any(|held| covers(held, key)))
}

/// True if some request holds `key` exactly or through an ancestor key
pub fn is_covered(requests: &[LockRequest], key: &str) -> bool {
    find_covering(requests, key).is_some()
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
