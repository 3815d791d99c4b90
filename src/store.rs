use crate::types::push::Subscription;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// Shared in-memory subscription store, keyed by endpoint. Saving the
/// same endpoint twice replaces the earlier record, so a re-subscribing
/// browser never accumulates duplicates. Cloning shares the underlying
/// map; handlers and broadcasts see the same entries.
#[derive(Clone, Default)]
pub struct SubscriptionStore {
    entries: Arc<Mutex<HashMap<String, Subscription>>>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, subscription: Subscription) {
        let mut entries = self.entries.lock().expect("subscription store lock");
        entries.insert(subscription.endpoint.clone(), subscription);
    }

    /// Removes the record for `endpoint`. Returns whether a record existed;
    /// removal of an unknown endpoint is a no-op.
    pub fn remove(&self, endpoint: &str) -> bool {
        let mut entries = self.entries.lock().expect("subscription store lock");
        entries.remove(endpoint).is_some()
    }

    pub fn get(&self, endpoint: &str) -> Option<Subscription> {
        let entries = self.entries.lock().expect("subscription store lock");
        entries.get(endpoint).cloned()
    }

    pub fn list(&self) -> Vec<Subscription> {
        let entries = self.entries.lock().expect("subscription store lock");
        entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("subscription store lock");
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::types::push::SubscriptionKeys;

    fn subscription(endpoint: &str) -> Subscription {
        Subscription {
            endpoint: endpoint.to_string(),
            keys: SubscriptionKeys {
                p256dh: "p256".to_string(),
                auth: "auth".to_string(),
            },
        }
    }

    #[test]
    fn put_then_remove__should_leave_store_empty() {
        // Given
        let store = SubscriptionStore::new();
        store.put(subscription("https://push.example/abc"));
        assert_eq!(store.len(), 1);

        // When
        let removed = store.remove("https://push.example/abc");

        // Then
        assert!(removed);
        assert!(store.is_empty());
    }

    #[test]
    fn put__should_replace_record_with_same_endpoint() {
        // Given
        let store = SubscriptionStore::new();
        store.put(subscription("https://push.example/abc"));
        let mut updated = subscription("https://push.example/abc");
        updated.keys.auth = "rotated".to_string();

        // When
        store.put(updated);

        // Then
        assert_eq!(store.len(), 1);
        let stored = store.get("https://push.example/abc").expect("stored record");
        assert_eq!(stored.keys.auth, "rotated");
    }

    #[test]
    fn remove__should_be_noop_for_unknown_endpoint() {
        // Given
        let store = SubscriptionStore::new();
        store.put(subscription("https://push.example/abc"));

        // When
        let removed = store.remove("https://push.example/other");

        // Then
        assert!(!removed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones__should_share_entries() {
        // Given
        let store = SubscriptionStore::new();
        let view = store.clone();

        // When
        store.put(subscription("https://push.example/abc"));

        // Then
        assert_eq!(view.len(), 1);
    }
}
