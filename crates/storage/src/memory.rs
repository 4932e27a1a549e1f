//! InMemoryStore: map-backed key-value store
//!
//! - `FxHashMap<String, String>` for the data
//! - `parking_lot::RwLock` for thread-safe access
//!
//! Reads take the shared lock; writes take the exclusive lock for the
//! duration of a single map operation.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use kvcodec_core::StoreResult;

use crate::traits::KeyValueStore;

/// In-memory key-value store
///
/// Cloning is cheap and shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<FxHashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every key
    pub fn clear(&self) {
        self.data.write().clear();
    }

    /// All keys currently stored, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for InMemoryStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        trace!(key, len = value.len(), "SET");
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self.data.read().get(key).cloned();
        trace!(key, hit = value.is_some(), "GET");
        Ok(value)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let removed = self.data.write().remove(key).is_some();
        trace!(key, removed, "DEL");
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}
