//! In-memory stores: a session-only backend and an always-failing one.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::RwLock;

use super::DurableStore;

/// Session-only storage. Values vanish when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that rejects every read and write.
///
/// Stands in for disabled or sandboxed client storage, and backs the
/// server's `--no-storage` mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl DurableStore for UnavailableStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable: cannot read '{key}'"))
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage unavailable: cannot write '{key}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "tech").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("tech"));

        store.set("theme", "ocean").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("ocean"));
    }

    #[test]
    fn test_memory_store_with_entries() {
        let store = MemoryStore::with_entries([("layout", "grid"), ("colorMode", "light")]);
        assert_eq!(store.get("layout").unwrap().as_deref(), Some("grid"));
        assert_eq!(store.get("colorMode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_unavailable_store_always_errors() {
        let store = UnavailableStore;
        assert!(store.get("theme").is_err());
        assert!(store.set("theme", "tech").is_err());
    }
}
