//! Key/value store contract shared by the hash tables and the B+Tree.
//!
//! An owner that keeps the same logical records in several indexes can
//! drive them through this trait. Keeping those indexes consistent with
//! each other is the owner's job; no implementation knows about another.

/// Unique-key map operations.
///
/// `put` overwrites an existing key and returns the value it replaced.
/// Lookups and removals of absent keys return `None`.
pub trait KeyValueStore<K, V> {
    /// Inserts or overwrites `key`, returning the previous value.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Drops every entry.
    fn clear(&mut self);

    /// Whether `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Whether the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
