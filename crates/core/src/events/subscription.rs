// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name patterns and subscriptions

/// Pattern over colon-separated event names
///
/// `*` matches one segment, `**` matches the rest of the name:
/// - `queue:insert` matches only itself
/// - `queue:*` matches `queue:insert` and `queue:grant`
/// - `queue:remove:*` matches every removal reason
/// - `**` matches every event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    pub fn matches(&self, event_name: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }

        let mut names = event_name.split(':');
        for segment in self.0.split(':') {
            if segment == "**" {
                return true;
            }
            match names.next() {
                Some(name) if segment == "*" || segment == name => {}
                _ => return false,
            }
        }

        names.next().is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Handle used to unsubscribe
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
}

impl Subscription {
    pub fn new(id: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns: patterns.iter().map(|p| EventPattern::new(p)).collect(),
        }
    }

    /// Check if any pattern matches the event
    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
