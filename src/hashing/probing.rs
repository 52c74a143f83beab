//! Open-addressing hash table with linear probing.
//!
//! # Algorithm
//!
//! Every slot is empty, occupied, or a tombstone left by a removal.
//!
//! - `put` scans `home, home+1, ...` (mod capacity) until it meets the key
//!   (overwrite), an empty slot, or wraps back to `home`. The first tombstone
//!   passed on the way is reused for the new entry, so a key never ends up
//!   stored twice. A wrap with no free slot resizes and retries.
//! - `get`/`remove` skip tombstones and stop at the first empty slot: a key
//!   that was never inserted cannot lie past an empty slot in its sequence.
//! - When `(len + tombstones) / capacity` exceeds the load factor (0.7 by
//!   default) the live entries are re-inserted into fresh slots and the
//!   tombstones dropped. The table doubles only if the live entries alone
//!   exceed the load factor; otherwise it is rebuilt at the same capacity.
//!   Removal never changes `len + tombstones`, so an empty slot always
//!   remains to end a scan.
//!
//! The default capacity, 101, is prime. Doubling does not preserve
//! primality; that only affects clustering, not correctness.
//!
//! # Reference
//! Knuth (1998), "The Art of Computer Programming", Vol. 3, §6.4 (Algorithm L)

use std::hash::Hash;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chained::bucket_for;
use crate::config::ProbingConfig;
use crate::error::Result;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Slot<K, V> {
    Empty,
    Occupied(K, V),
    Tombstone,
}

/// Linear-probing hash table with tombstone deletion.
///
/// Tracks how many insertions had to step past their home slot.
///
/// # Example
/// ```
/// use u_collections::hashing::LinearProbingHash;
///
/// let mut files = LinearProbingHash::new();
/// files.put(1001, "members.dat");
/// files.put(1002, "equipment.dat");
/// files.remove(&1001);
///
/// assert_eq!(files.get(&1002), Some(&"equipment.dat"));
/// assert_eq!(files.tombstone_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearProbingHash<K, V> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    collisions: usize,
    max_load_factor: f64,
}

impl<K: Hash + Eq, V> LinearProbingHash<K, V> {
    /// Creates a table with 101 slots and a 0.7 load factor.
    pub fn new() -> Self {
        let config = ProbingConfig::default();
        Self::empty(config.initial_capacity, config.max_load_factor)
    }

    /// Creates a table with `capacity` initial slots.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(&ProbingConfig {
            initial_capacity: capacity,
            ..ProbingConfig::default()
        })
    }

    /// Creates a table from a validated configuration.
    pub fn with_config(config: &ProbingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config.initial_capacity, config.max_load_factor))
    }

    fn empty(capacity: usize, max_load_factor: f64) -> Self {
        Self {
            slots: empty_slots(capacity),
            len: 0,
            tombstones: 0,
            collisions: 0,
            max_load_factor,
        }
    }

    /// Inserts or overwrites `key`, returning the replaced value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let capacity = self.slots.len();
        let home = bucket_for(&key, capacity);
        // (slot index, distance from home) of the first reusable slot
        let mut vacant: Option<(usize, usize)> = None;

        for distance in 0..capacity {
            let index = (home + distance) % capacity;
            match &mut self.slots[index] {
                Slot::Occupied(existing, current) if *existing == key => {
                    return Some(mem::replace(current, value));
                }
                Slot::Occupied(..) => {}
                Slot::Tombstone => {
                    vacant.get_or_insert((index, distance));
                }
                Slot::Empty => {
                    vacant.get_or_insert((index, distance));
                    break;
                }
            }
        }

        let Some((index, distance)) = vacant else {
            self.rebuild(capacity * 2);
            return self.put(key, value);
        };

        if distance > 0 {
            self.collisions += 1;
        }
        if matches!(self.slots[index], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(key, value);
        self.len += 1;

        if self.occupancy() > self.max_load_factor {
            let capacity = if self.load_factor() > self.max_load_factor {
                capacity * 2
            } else {
                capacity
            };
            self.rebuild(capacity);
        }
        None
    }

    fn find_index(&self, key: &K) -> Option<usize> {
        let capacity = self.slots.len();
        let home = bucket_for(key, capacity);

        for distance in 0..capacity {
            let index = (home + distance) % capacity;
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(existing, _) if existing == key => return Some(index),
                _ => {}
            }
        }
        None
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.slots[self.find_index(key)?] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Removes `key`, leaving a tombstone in its slot.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.find_index(key)?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.len -= 1;
                self.tombstones += 1;
                Some(value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Slots that are not empty, live or tombstoned, per slot.
    fn occupancy(&self) -> f64 {
        (self.len + self.tombstones) as f64 / self.slots.len() as f64
    }

    /// Re-inserts the live entries into `new_capacity` empty slots.
    fn rebuild(&mut self, new_capacity: usize) {
        let old_capacity = self.slots.len();
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        let dropped_tombstones = self.tombstones;

        self.len = 0;
        self.tombstones = 0;
        self.collisions = 0;

        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                self.put(key, value);
            }
        }

        debug!(
            from = old_capacity,
            to = new_capacity,
            entries = self.len,
            dropped_tombstones,
            "probing hash table rebuilt"
        );
    }
}

impl<K, V> LinearProbingHash<K, V> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live entries per slot. Tombstones do not count.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Insertions since the last rebuild that stepped past their home slot.
    pub fn collision_count(&self) -> usize {
        self.collisions
    }

    /// Removed slots not yet reclaimed by an insertion or a rebuild.
    pub fn tombstone_count(&self) -> usize {
        self.tombstones
    }

    /// Resets every slot to empty. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
        self.collisions = 0;
    }

    /// Iterates over live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            _ => None,
        })
    }
}

impl<K: Hash + Eq, V> Default for LinearProbingHash<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> KeyValueStore<K, V> for LinearProbingHash<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LinearProbingHash::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        LinearProbingHash::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LinearProbingHash::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        LinearProbingHash::clear(self);
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use std::hash::Hasher;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Colliding(&'static str);

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            42u64.hash(state);
        }
    }

    #[test]
    fn test_put_get_remove() {
        let mut table = LinearProbingHash::new();
        table.put("M1", 10);
        table.put("M2", 20);

        assert_eq!(table.get(&"M1"), Some(&10));
        assert_eq!(table.put("M1", 11), Some(10));
        assert_eq!(table.remove(&"M1"), Some(11));
        assert_eq!(table.get(&"M1"), None);
        assert_eq!(table.remove(&"M1"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_collision_counter() {
        let mut table = LinearProbingHash::new();
        table.put(Colliding("a"), 1);
        assert_eq!(table.collision_count(), 0);

        table.put(Colliding("b"), 2);
        table.put(Colliding("c"), 3);
        assert_eq!(table.collision_count(), 2);

        // Overwrites are not new insertions
        table.put(Colliding("c"), 30);
        assert_eq!(table.collision_count(), 2);
    }

    #[test]
    fn test_tombstone_does_not_block_later_keys() {
        let mut table = LinearProbingHash::new();
        table.put(Colliding("a"), 1);
        table.put(Colliding("b"), 2);
        table.put(Colliding("c"), 3);

        assert_eq!(table.remove(&Colliding("b")), Some(2));
        assert_eq!(table.tombstone_count(), 1);

        assert_eq!(table.get(&Colliding("c")), Some(&3));
        assert!(table.contains_key(&Colliding("a")));
        assert!(!table.contains_key(&Colliding("b")));
    }

    #[test]
    fn test_overwrite_past_tombstone_keeps_single_copy() {
        let mut table = LinearProbingHash::new();
        table.put(Colliding("a"), 1);
        table.put(Colliding("b"), 2);
        table.put(Colliding("c"), 3);
        table.remove(&Colliding("a"));

        // "c" lives past the tombstone; it must be found, not duplicated
        assert_eq!(table.put(Colliding("c"), 33), Some(3));
        assert_eq!(table.len(), 2);
        assert_eq!(table.tombstone_count(), 1);

        table.remove(&Colliding("c"));
        assert_eq!(table.get(&Colliding("c")), None);
    }

    #[test]
    fn test_insert_reuses_tombstone() {
        let mut table = LinearProbingHash::new();
        table.put(Colliding("a"), 1);
        table.put(Colliding("b"), 2);
        table.remove(&Colliding("a"));

        table.put(Colliding("d"), 4);
        assert_eq!(table.tombstone_count(), 0);
        assert_eq!(table.get(&Colliding("d")), Some(&4));
        assert_eq!(table.get(&Colliding("b")), Some(&2));
    }

    #[test]
    fn test_resize_at_load_factor() {
        let mut table = LinearProbingHash::new();
        for i in 0..70 {
            table.put(i, i);
        }
        assert_eq!(table.capacity(), 101);

        // 71 / 101 > 0.7
        table.put(70, 70);
        assert_eq!(table.capacity(), 202);
        for i in 0..71 {
            assert_eq!(table.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_resize_drops_tombstones() {
        let mut table = LinearProbingHash::with_capacity(10).unwrap();
        for i in 0..7 {
            table.put(i, i);
        }
        table.remove(&0);
        table.remove(&1);
        assert_eq!(table.tombstone_count(), 2);

        for i in 10..13 {
            table.put(i, i);
        }
        assert!(table.capacity() > 10);
        assert_eq!(table.tombstone_count(), 0);
        assert_eq!(table.len(), 8);
        assert_eq!(table.iter().count(), 8);
    }

    #[test]
    fn test_churn_keeps_empty_slots() {
        let mut table = LinearProbingHash::with_capacity(101).unwrap();
        for i in 0..5000 {
            table.put(i, i);
            assert_eq!(table.remove(&i), Some(i));
        }

        assert!(table.is_empty());
        assert_eq!(table.capacity(), 101);
        assert!(table.tombstone_count() < table.capacity());
        assert!(table.tombstone_count() as f64 / table.capacity() as f64 <= 0.7);
        assert!(!table.contains_key(&5000));

        table.put(5000, 1);
        assert_eq!(table.get(&5000), Some(&1));
    }

    #[test]
    fn test_tombstone_rebuild_keeps_capacity_when_live_load_is_low() {
        let mut table = LinearProbingHash::with_capacity(10).unwrap();
        for i in 0..7 {
            table.put(i, i);
        }
        for i in 0..3 {
            table.remove(&i);
        }
        // 4 live + 3 tombstones; the next fresh slot tips occupancy over 0.7
        for i in 100..200 {
            if table.tombstone_count() == 0 {
                break;
            }
            table.put(i, i);
        }
        assert_eq!(table.tombstone_count(), 0);
        assert_eq!(table.capacity(), 10);
        for i in 3..7 {
            assert_eq!(table.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_clear() {
        let mut table = LinearProbingHash::new();
        table.put(Colliding("a"), 1);
        table.put(Colliding("b"), 2);
        table.remove(&Colliding("a"));
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.tombstone_count(), 0);
        assert_eq!(table.collision_count(), 0);
        assert_eq!(table.get(&Colliding("b")), None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            LinearProbingHash::<u8, u8>::with_capacity(0),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_snapshot_keeps_tombstones() {
        let mut table = LinearProbingHash::new();
        table.put(1u32, "one".to_string());
        table.put(2u32, "two".to_string());
        table.remove(&1);

        let json = serde_json::to_string(&table).unwrap();
        let restored: LinearProbingHash<u32, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.tombstone_count(), 1);
        assert_eq!(restored.get(&2), Some(&"two".to_string()));
        assert_eq!(restored.get(&1), None);
    }
}
