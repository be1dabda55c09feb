use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use anyhow::Result as Fallible;
use hc_core::gateways::kv::KvStore;
use parking_lot::Mutex;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A process-local key-value store with expiring entries.
///
/// Expired entries are purged lazily on access.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> Fallible<()> {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries
            .lock()
            .insert(key.to_owned(), Entry { value, expires_at });
        Ok(())
    }

    fn delete(&self, key: &str) -> Fallible<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_delete() {
        let kv = MemoryKvStore::new();
        assert!(kv.get("public").unwrap().is_none());
        kv.set("public", "[]".into(), Duration::from_secs(60)).unwrap();
        assert_eq!(kv.get("public").unwrap().as_deref(), Some("[]"));
        kv.set("public", "[1]".into(), Duration::from_secs(60)).unwrap();
        assert_eq!(kv.get("public").unwrap().as_deref(), Some("[1]"));
        kv.delete("public").unwrap();
        assert!(kv.get("public").unwrap().is_none());
        assert!(kv.is_empty());
    }

    #[test]
    fn entries_expire() {
        let kv = MemoryKvStore::new();
        kv.set("private:org", "[]".into(), Duration::ZERO).unwrap();
        assert!(kv.get("private:org").unwrap().is_none());
        assert_eq!(kv.len(), 0);
    }
}
