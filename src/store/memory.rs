use std::{collections::BTreeMap, sync::Mutex};

use crate::store::KeyValueStore;

/// In-memory store, for hosts without persistent storage and for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the value stored under `key`
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.remove(key)
    }

    /// All keys currently stored
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: String) -> Option<String> {
        self.entries.lock().ok()?.get(&key).cloned()
    }

    fn set(&self, key: String, value: String) -> bool {
        self.entries
            .lock()
            .map(|mut entries| {
                entries.insert(key, value);
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basic_operations() {
        let store = MemoryStore::new();
        assert!(store.get("k".into()).is_none());

        assert!(store.set("k".into(), "v1".into()));
        assert_eq!(store.get("k".into()).as_deref(), Some("v1"));

        assert!(store.set("k".into(), "v2".into()));
        assert_eq!(store.get("k".into()).as_deref(), Some("v2"));
        assert_eq!(store.keys(), vec!["k".to_string()]);

        assert_eq!(store.remove("k").as_deref(), Some("v2"));
        assert!(store.get("k".into()).is_none());
    }
}
