//! In-process blob store with browser-storage style quota accounting.

use super::{KvStore, StoreError, StoreResult};
use std::collections::HashMap;

/// `HashMap`-backed store.
///
/// When a quota is configured, the sum of key and value byte lengths across
/// all entries must stay within it; an oversized `set` fails and leaves the
/// previous value in place.
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota_bytes` in total.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently held (keys plus values).
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(limit) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let required = self.used_bytes() - replaced + key.len() + value.len();
            if required > limit {
                return Err(StoreError::QuotaExceeded { limit, required });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::store::{KvStore, StoreError};

    #[test]
    fn get_missing_key_returns_none() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get("employees").unwrap(), None);
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryKvStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn quota_counts_replacement_not_accumulation() {
        let mut store = MemoryKvStore::with_quota(6);
        store.set("k", "abcde").unwrap();
        store.set("k", "vwxyz").unwrap();
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn quota_rejection_keeps_old_value() {
        let mut store = MemoryKvStore::with_quota(6);
        store.set("k", "abc").unwrap();

        let err = store.set("k", "abcdefgh").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                limit: 6,
                required: 9
            }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
    }
}
