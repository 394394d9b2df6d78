// In-memory store backend.
// Process-local map with no persistence; safe for concurrent use.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;

use super::{CacheEntry, Store};

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, entry: CacheEntry) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::message::{Headers, Response};

    fn entry(body: &str) -> CacheEntry {
        CacheEntry::new(Response::new(200, Headers::new(), body.as_bytes().to_vec()))
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("https://api.github.test/a").unwrap().is_none());
    }

    #[test]
    fn set_replaces_the_previous_entry() {
        let store = MemoryStore::new();
        let key = "https://api.github.test/a";

        store.set(key, entry("first")).unwrap();
        store.set(key, entry("second")).unwrap();

        let stored = store.get(key).unwrap().unwrap();
        assert_eq!(stored.response.body, b"second".to_vec());
    }
}
