//! Separate-chaining hash table.
//!
//! # Algorithm
//!
//! Each bucket holds a chain of `(key, value)` entries whose hashes share
//! the bucket index `hash(key) mod capacity`. `put` scans the chain and
//! overwrites a matching key in place, otherwise appends. When
//! `len / capacity` exceeds the configured maximum load factor, capacity
//! doubles and every entry is rehashed into fresh buckets.
//!
//! # Complexity
//! Average O(1) for `put`/`get`/`remove`; O(n) when every key collides.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 11.2

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HashTableConfig;
use crate::error::Result;
use crate::store::KeyValueStore;

/// Hash table with separate chaining and full-rebuild resizing.
///
/// # Example
/// ```
/// use u_collections::hashing::HashTable;
///
/// let mut members = HashTable::new();
/// members.put("M001", "Alice");
/// members.put("M002", "Bob");
///
/// assert_eq!(members.get(&"M001"), Some(&"Alice"));
/// assert_eq!(members.remove(&"M002"), Some("Bob"));
/// assert!(!members.contains_key(&"M002"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashTable<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    max_load_factor: f64,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Creates a table with 16 buckets and a 0.75 load factor.
    pub fn new() -> Self {
        let config = HashTableConfig::default();
        Self::empty(config.initial_capacity, config.max_load_factor)
    }

    /// Creates a table with `capacity` initial buckets.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(&HashTableConfig {
            initial_capacity: capacity,
            ..HashTableConfig::default()
        })
    }

    /// Creates a table from a validated configuration.
    pub fn with_config(config: &HashTableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config.initial_capacity, config.max_load_factor))
    }

    fn empty(capacity: usize, max_load_factor: f64) -> Self {
        Self {
            buckets: new_buckets(capacity),
            len: 0,
            max_load_factor,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        bucket_for(key, self.buckets.len())
    }

    /// Inserts or overwrites `key`, returning the replaced value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some((_, current)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(current, value));
        }

        bucket.push((key, value));
        self.len += 1;

        if self.load_factor() > self.max_load_factor {
            self.resize();
        }
        None
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(k, _)| k == key)?;
        self.len -= 1;
        Some(bucket.swap_remove(position).1)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn resize(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let old = mem::replace(&mut self.buckets, new_buckets(new_capacity));

        for (key, value) in old.into_iter().flatten() {
            let index = bucket_for(&key, new_capacity);
            self.buckets[index].push((key, value));
        }

        debug!(
            from = old_capacity,
            to = new_capacity,
            entries = self.len,
            "chained hash table resized"
        );
    }
}

impl<K, V> HashTable<K, V> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Empties every bucket. Capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates over all entries in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    /// Iterates over all keys in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over all values in bucket order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Mean length of the non-empty chains, 0.0 when the table is empty.
    pub fn average_chain_length(&self) -> f64 {
        let non_empty = self.buckets.iter().filter(|b| !b.is_empty()).count();
        if non_empty == 0 {
            0.0
        } else {
            self.len as f64 / non_empty as f64
        }
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> KeyValueStore<K, V> for HashTable<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        HashTable::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashTable::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashTable::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        HashTable::clear(self);
    }
}

fn new_buckets<K, V>(capacity: usize) -> Vec<Vec<(K, V)>> {
    (0..capacity).map(|_| Vec::new()).collect()
}

pub(crate) fn bucket_for<K: Hash + ?Sized>(key: &K, capacity: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;

    /// Key whose every instance lands in the same bucket.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Colliding(u32);

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            0u8.hash(state);
        }
    }

    #[test]
    fn test_put_and_get() {
        let mut table = HashTable::new();
        assert_eq!(table.put("alice", 30), None);
        assert_eq!(table.put("bob", 25), None);

        assert_eq!(table.get(&"alice"), Some(&30));
        assert_eq!(table.get(&"bob"), Some(&25));
        assert_eq!(table.get(&"carol"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let mut table = HashTable::new();
        table.put("alice", 30);
        assert_eq!(table.put("alice", 31), Some(30));
        assert_eq!(table.get(&"alice"), Some(&31));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut table = HashTable::new();
        table.put(1, "one");
        table.put(2, "two");

        assert_eq!(table.remove(&1), Some("one"));
        assert!(!table.contains_key(&1));
        assert_eq!(table.remove(&1), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut table = HashTable::new();
        table.put("counter", 1);
        if let Some(value) = table.get_mut(&"counter") {
            *value += 41;
        }
        assert_eq!(table.get(&"counter"), Some(&42));
    }

    #[test]
    fn test_resize_doubles_capacity() {
        let mut table = HashTable::new();
        for i in 0..12 {
            table.put(i, i);
        }
        // 12 / 16 = 0.75 is not above the threshold
        assert_eq!(table.capacity(), 16);

        table.put(12, 12);
        assert_eq!(table.capacity(), 32);
        assert!(table.load_factor() <= 0.75);
        for i in 0..13 {
            assert_eq!(table.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_load_factor_bounded_after_many_puts() {
        let mut table = HashTable::new();
        for i in 0..1000 {
            table.put(i, i * 2);
            assert!(table.load_factor() <= 0.75);
        }
        assert_eq!(table.len(), 1000);
        assert_eq!(table.get(&777), Some(&1554));
    }

    #[test]
    fn test_colliding_keys_share_chain() {
        let mut table = HashTable::with_capacity(64).unwrap();
        for i in 0..5 {
            table.put(Colliding(i), i);
        }
        assert!((table.average_chain_length() - 5.0).abs() < 1e-10);

        assert_eq!(table.remove(&Colliding(2)), Some(2));
        for i in [0, 1, 3, 4] {
            assert_eq!(table.get(&Colliding(i)), Some(&i));
        }
        assert!(!table.contains_key(&Colliding(2)));
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = HashTable::new();
        table.put("a", 1);
        table.put("b", 2);
        table.put("c", 3);

        let mut keys: Vec<_> = table.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let total: i32 = table.values().sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut table = HashTable::new();
        for i in 0..20 {
            table.put(i, ());
        }
        let capacity = table.capacity();
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.average_chain_length(), 0.0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = HashTable::<u32, u32>::with_capacity(0);
        assert!(matches!(result, Err(CollectionError::InvalidArgument(_))));
    }

    #[test]
    fn test_store_trait() {
        fn fill<S: KeyValueStore<u32, &'static str>>(store: &mut S) {
            store.put(7, "seven");
            store.put(8, "eight");
        }

        let mut table = HashTable::new();
        fill(&mut table);
        assert!(KeyValueStore::contains_key(&table, &7));
        assert_eq!(KeyValueStore::len(&table), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut table = HashTable::new();
        for i in 0..20u32 {
            table.put(i, format!("member-{i}"));
        }

        let json = serde_json::to_string(&table).unwrap();
        let restored: HashTable<u32, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 20);
        assert_eq!(restored.capacity(), table.capacity());
        assert_eq!(restored.get(&13), Some(&"member-13".to_string()));
    }
}
