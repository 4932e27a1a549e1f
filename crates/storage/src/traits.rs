//! Key-value store trait

use kvcodec_core::StoreResult;

/// String-keyed, string-valued store
///
/// This is the only view of a store the codec layer has. Implementations may
/// be local maps or remote clients; the codec layer imposes no timeout and
/// performs no retry, so both belong to the implementation.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects or cannot perform the write.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Fetch the value stored under `key`
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot perform the read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Remove `key`
    ///
    /// Returns true if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot perform the delete.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Number of keys currently stored
    fn len(&self) -> usize;

    /// True if the store holds no keys
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
