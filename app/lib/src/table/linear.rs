//! Open-addressing hash table with linear probing.
//!
//! A key's home slot is `hash(key) % capacity`. Lookups scan forward from
//! the home slot (wrapping around) until they find the key or an empty
//! slot. The table keeps this invariant at all times:
//!
//! > for every stored key, no empty slot lies between its home slot and
//! > the slot that holds it.
//!
//! Removal does not leave tombstones. The freed slot is emptied and every
//! entry of the occupied run that follows it is placed again from its own
//! home slot, which closes any gap the removal opened in someone else's
//! probe sequence.

use log::{debug, trace};

use super::{Entry, HashTable, Strategy, TableStats};
use crate::config::{ProbingConfig, ResizePolicy};
use crate::error::{Result, TableError};
use crate::hash::index_for;
use crate::key::{Key, KeyRef};

#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
}

impl<V> Slot<V> {
    fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Outcome of probing for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeResult {
    /// The key is stored at this index.
    Found(usize),
    /// The key is absent; this is the first empty slot of its sequence.
    Vacant(usize),
    /// The key is absent and every slot is occupied.
    Exhausted,
}

/// Hash table resolving collisions by scanning forward to the next free
/// slot.
///
/// With the default [`ResizePolicy::Grow`] policy the table doubles its
/// capacity before occupancy would pass the configured load factor, so an
/// insert never fails. With [`ResizePolicy::Fixed`] a new key is rejected
/// with [`TableError::CapacityExhausted`] once every slot is taken.
///
/// # Example
///
/// ```
/// use htable::{HashTable, LinearProbingTable, ProbingConfig, TableError};
///
/// let mut table = LinearProbingTable::with_config(
///     ProbingConfig::new().with_initial_capacity(2).fixed(),
/// );
/// table.insert(1, "one").unwrap();
/// table.insert(2, "two").unwrap();
///
/// assert_eq!(
///     table.insert(3, "three"),
///     Err(TableError::CapacityExhausted { capacity: 2 })
/// );
/// assert_eq!(table.retrieve(2), Some("two"));
/// ```
#[derive(Debug, Clone)]
pub struct LinearProbingTable<V> {
    slots: Vec<Slot<V>>,
    count: usize,
    resize: ResizePolicy,
    resizes: usize,
}

impl<V> LinearProbingTable<V> {
    /// Create a table with `capacity` slots and the default resize policy.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(ProbingConfig::default().with_initial_capacity(capacity.max(1)))
    }

    /// Create a table from a configuration.
    pub fn with_config(config: ProbingConfig) -> Self {
        Self {
            slots: empty_slots(config.initial_capacity.max(1)),
            count: 0,
            resize: config.resize,
            resizes: 0,
        }
    }

    /// The resize policy this table was built with.
    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Index of the slot holding `key`, if present.
    pub fn slot_of<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<usize> {
        match self.probe(key.into()) {
            ProbeResult::Found(index) => Some(index),
            _ => None,
        }
    }

    /// Verify the probe invariant: every stored key is reachable from its
    /// home slot without crossing an empty slot, and the occupied count is
    /// accurate.
    pub fn is_consistent(&self) -> bool {
        let capacity = self.slots.len();
        let mut occupied = 0;

        for (index, slot) in self.slots.iter().enumerate() {
            let Slot::Occupied(entry) = slot else {
                continue;
            };
            occupied += 1;

            let home = index_for(&entry.key, capacity);
            let mut cursor = home;
            while cursor != index {
                if self.slots[cursor].is_empty() {
                    return false;
                }
                cursor = (cursor + 1) % capacity;
            }
        }

        occupied == self.count
    }

    /// Scan the probe sequence of `key`.
    fn probe(&self, key: KeyRef<'_>) -> ProbeResult {
        let capacity = self.slots.len();
        let start = index_for(key, capacity);

        for step in 0..capacity {
            let index = (start + step) % capacity;
            match &self.slots[index] {
                Slot::Empty => return ProbeResult::Vacant(index),
                Slot::Occupied(entry) if entry.key.matches(key) => {
                    return ProbeResult::Found(index)
                }
                Slot::Occupied(_) => {}
            }
        }

        ProbeResult::Exhausted
    }

    /// First empty slot on the probe sequence of `key`.
    fn first_empty(&self, key: KeyRef<'_>) -> Option<usize> {
        let capacity = self.slots.len();
        let start = index_for(key, capacity);
        (0..capacity)
            .map(|step| (start + step) % capacity)
            .find(|&index| self.slots[index].is_empty())
    }

    /// Place an entry whose key is known to be absent.
    fn place(&mut self, entry: Entry<V>) -> Result<()> {
        match self.first_empty(entry.key.as_key_ref()) {
            Some(index) => {
                self.slots[index] = Slot::Occupied(entry);
                self.count += 1;
                Ok(())
            }
            None => Err(TableError::CapacityExhausted {
                capacity: self.slots.len(),
            }),
        }
    }

    /// Re-place every entry of the occupied run that starts after `freed`.
    ///
    /// Each entry is lifted out of its slot and put back into the first
    /// empty slot of its own probe sequence, which is never further than
    /// where it was.
    fn repair_run(&mut self, freed: usize) {
        let capacity = self.slots.len();
        let mut index = freed;
        let mut moved = 0;

        for _ in 1..capacity {
            index = (index + 1) % capacity;
            let Slot::Occupied(entry) = std::mem::replace(&mut self.slots[index], Slot::Empty)
            else {
                break;
            };

            let target = self.first_empty(entry.key.as_key_ref()).unwrap_or(index);
            if target != index {
                moved += 1;
            }
            self.slots[target] = Slot::Occupied(entry);
        }

        if moved > 0 {
            trace!(
                "Linear probing removal at slot {} shifted {} entries",
                freed,
                moved
            );
        }
    }

    /// Move every entry into a fresh slot array of `new_capacity`.
    ///
    /// `new_capacity` must be at least `count`.
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.slots.len();
        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));

        for slot in old {
            if let Slot::Occupied(entry) = slot {
                let index = self
                    .first_empty(entry.key.as_key_ref())
                    .unwrap_or_default();
                self.slots[index] = Slot::Occupied(entry);
            }
        }
        self.resizes += 1;

        debug!(
            "Linear probing table resized from {} to {} slots ({} entries)",
            old_capacity, new_capacity, self.count
        );
    }
}

impl<V> Default for LinearProbingTable<V> {
    fn default() -> Self {
        Self::with_config(ProbingConfig::default())
    }
}

impl<V> HashTable<V> for LinearProbingTable<V> {
    fn insert<K: Into<Key>>(&mut self, key: K, value: V) -> Result<()> {
        let key = key.into();
        let capacity = self.slots.len();

        let vacant = match self.probe(key.as_key_ref()) {
            ProbeResult::Found(index) => {
                if let Slot::Occupied(entry) = &mut self.slots[index] {
                    entry.value = value;
                }
                return Ok(());
            }
            ProbeResult::Vacant(index) => Some(index),
            ProbeResult::Exhausted => None,
        };

        // A growing table never reports full, even with an out-of-range load factor
        let exhausted = vacant.is_none() && self.resize.is_growing();
        if exhausted || self.resize.should_grow(self.count, capacity) {
            self.rehash(capacity * 2);
            return self.place(Entry::new(key, value));
        }

        match vacant {
            Some(index) => {
                self.slots[index] = Slot::Occupied(Entry::new(key, value));
                self.count += 1;
                Ok(())
            }
            None => Err(TableError::CapacityExhausted { capacity }),
        }
    }

    fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&V> {
        match self.probe(key.into()) {
            ProbeResult::Found(index) => match &self.slots[index] {
                Slot::Occupied(entry) => Some(&entry.value),
                Slot::Empty => None,
            },
            ProbeResult::Vacant(_) | ProbeResult::Exhausted => None,
        }
    }

    fn remove<'k>(&mut self, key: impl Into<KeyRef<'k>>) -> bool {
        let ProbeResult::Found(index) = self.probe(key.into()) else {
            return false;
        };

        self.slots[index] = Slot::Empty;
        self.count -= 1;
        self.repair_run(index);
        true
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 || new_capacity < self.count {
            return Err(TableError::InvalidCapacity {
                requested: new_capacity,
                len: self.count,
            });
        }
        self.rehash(new_capacity);
        Ok(())
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.count = 0;
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a Key, &'a V)> + 'a
    where
        V: 'a,
    {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some((&entry.key, &entry.value)),
            Slot::Empty => None,
        })
    }

    fn stats(&self) -> TableStats {
        let capacity = self.slots.len();
        let max_probe_length = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(entry) => {
                    let home = index_for(&entry.key, capacity);
                    Some((index + capacity - home) % capacity + 1)
                }
                Slot::Empty => None,
            })
            .max()
            .unwrap_or(0);

        TableStats {
            strategy: Strategy::LinearProbing,
            len: self.count,
            capacity,
            load_factor: self.load_factor(),
            resizes: self.resizes,
            max_probe_length,
        }
    }

    fn strategy(&self) -> Strategy {
        Strategy::LinearProbing
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(capacity: usize) -> LinearProbingTable<i32> {
        LinearProbingTable::with_config(
            ProbingConfig::new()
                .with_initial_capacity(capacity)
                .fixed(),
        )
    }

    fn slot_keys(table: &LinearProbingTable<i32>) -> Vec<Option<Key>> {
        table
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Occupied(entry) => Some(entry.key.clone()),
                Slot::Empty => None,
            })
            .collect()
    }

    #[test]
    fn test_new_table_is_empty() {
        let table: LinearProbingTable<i32> = LinearProbingTable::new(10);
        assert!(table.is_empty());
        assert!(!table.is_full());
        assert_eq!(table.capacity(), 10);
        assert_eq!(table.retrieve("nothing"), None);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_insert_retrieve_update() {
        let mut table = LinearProbingTable::new(10);
        table.insert("age", 30).unwrap();
        table.insert("age", 31).unwrap();
        table.insert(-4, 4).unwrap();

        assert_eq!(table.retrieve("age"), Some(31));
        assert_eq!(table.retrieve(-4), Some(4));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_collisions_probe_forward_and_wrap() {
        let mut table = fixed(5);
        // 4, 9 and 14 all have home slot 4
        table.insert(4, 40).unwrap();
        table.insert(9, 90).unwrap();
        table.insert(14, 140).unwrap();

        assert_eq!(table.slot_of(4), Some(4));
        assert_eq!(table.slot_of(9), Some(0));
        assert_eq!(table.slot_of(14), Some(1));
        assert_eq!(table.retrieve(14), Some(140));
        assert_eq!(table.stats().max_probe_length, 3);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_lookup_stops_at_empty_slot() {
        let mut table = fixed(10);
        table.insert(1, 1).unwrap();
        // 11 shares home slot 1 but was never inserted
        assert_eq!(table.retrieve(11), None);
        assert!(!table.remove(11));
    }

    #[test]
    fn test_remove_repairs_following_run() {
        let mut table = fixed(10);
        // Cluster: 1 -> slot 1, 11 -> slot 2, 2 -> slot 3, 21 -> slot 4
        for key in [1, 11, 2, 21] {
            table.insert(key, key).unwrap();
        }
        assert_eq!(table.slot_of(21), Some(4));

        assert!(table.remove(1));

        // 11 and 21 move back towards home slot 1, 2 moves to its home
        assert_eq!(
            slot_keys(&table)[..6],
            [
                None,
                Some(Key::Int(11)),
                Some(Key::Int(2)),
                Some(Key::Int(21)),
                None,
                None
            ]
        );
        assert!(table.is_consistent());
        assert_eq!(table.retrieve(1), None);
        for key in [11, 2, 21] {
            assert_eq!(table.retrieve(key), Some(key));
        }
    }

    #[test]
    fn test_remove_repairs_run_across_wraparound() {
        let mut table = fixed(5);
        // home slot 3: 3 -> 3, 8 -> 4, 13 -> 0; home slot 0: 5 -> 1
        for key in [3, 8, 13, 5] {
            table.insert(key, key).unwrap();
        }
        assert_eq!(table.slot_of(5), Some(1));

        assert!(table.remove(8));
        assert!(table.is_consistent());
        assert_eq!(table.slot_of(13), Some(4));
        assert_eq!(table.slot_of(5), Some(0));
        for key in [3, 13, 5] {
            assert_eq!(table.retrieve(key), Some(key));
        }
    }

    #[test]
    fn test_remove_from_full_fixed_table() {
        let mut table = fixed(4);
        for key in [0, 4, 8, 12] {
            table.insert(key, key).unwrap();
        }
        assert!(table.is_full());

        assert!(table.remove(4));
        assert!(table.is_consistent());
        assert_eq!(table.len(), 3);
        for key in [0, 8, 12] {
            assert_eq!(table.retrieve(key), Some(key));
        }

        table.insert(16, 16).unwrap();
        assert!(table.is_full());
        assert!(table.is_consistent());
    }

    #[test]
    fn test_remove_twice() {
        let mut table = LinearProbingTable::new(10);
        table.insert("a", 1).unwrap();
        assert!(table.remove("a"));
        assert!(!table.remove("a"));
        assert!(!table.remove("missing"));
    }

    #[test]
    fn test_fixed_table_fills_then_rejects() {
        let mut table = fixed(10);
        for i in 0..10 {
            table.insert(i, i).unwrap();
        }
        assert!(table.is_full());
        for i in 0..10 {
            assert_eq!(table.retrieve(i), Some(i));
        }

        let before = slot_keys(&table);
        assert_eq!(
            table.insert(10, 10),
            Err(TableError::CapacityExhausted { capacity: 10 })
        );
        assert_eq!(slot_keys(&table), before);
        assert_eq!(table.len(), 10);
        assert_eq!(table.retrieve(10), None);
    }

    #[test]
    fn test_update_in_full_fixed_table_succeeds() {
        let mut table = fixed(3);
        for i in 0..3 {
            table.insert(i, i).unwrap();
        }
        table.insert(2, 200).unwrap();
        assert_eq!(table.retrieve(2), Some(200));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_grow_policy_doubles_capacity() {
        let mut table = LinearProbingTable::new(10);
        for i in 0..10 {
            table.insert(i, i).unwrap();
        }

        assert_eq!(table.capacity(), 20);
        assert_eq!(table.stats().resizes, 1);
        assert!(table.load_factor() <= 0.7);
        assert!(table.is_consistent());
        for i in 0..10 {
            assert_eq!(table.retrieve(i), Some(i));
        }
    }

    #[test]
    fn test_grow_policy_with_full_load_factor_never_fails() {
        let mut table = LinearProbingTable::with_config(
            ProbingConfig::new()
                .with_initial_capacity(2)
                .with_max_load_factor(1.0),
        );
        for i in 0..50 {
            table.insert(i, i).unwrap();
        }
        assert_eq!(table.len(), 50);
        assert!(table.capacity() >= 50);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_grow_policy_with_unvalidated_load_factor_never_fails() {
        for max_load_factor in [1.5, f64::NAN] {
            let mut table = LinearProbingTable::with_config(ProbingConfig {
                initial_capacity: 4,
                resize: ResizePolicy::Grow { max_load_factor },
            });
            for i in 0..6 {
                assert_eq!(table.insert(i, i), Ok(()), "load factor {}", max_load_factor);
            }
            assert_eq!(table.len(), 6);
            assert_eq!(table.capacity(), 8);
            assert!(table.is_consistent());
            for i in 0..6 {
                assert_eq!(table.retrieve(i), Some(i));
            }
        }
    }

    #[test]
    fn test_explicit_resize() {
        let mut table = fixed(10);
        for i in 0..6 {
            table.insert(i * 10, i).unwrap();
        }

        table.resize(7).unwrap();
        assert_eq!(table.capacity(), 7);
        assert!(table.is_consistent());
        for i in 0..6 {
            assert_eq!(table.retrieve(i * 10), Some(i));
        }

        assert_eq!(
            table.resize(5),
            Err(TableError::InvalidCapacity {
                requested: 5,
                len: 6
            })
        );
        assert!(table.resize(0).is_err());
        assert_eq!(table.capacity(), 7);
    }

    #[test]
    fn test_clear() {
        let mut table = fixed(4);
        table.insert("x", 1).unwrap();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 4);
        assert!(slot_keys(&table).iter().all(Option::is_none));
    }

    #[test]
    fn test_iter_in_slot_order() {
        let mut table = fixed(10);
        table.insert(5, 5).unwrap();
        table.insert(2, 2).unwrap();
        let keys: Vec<&Key> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![&Key::Int(2), &Key::Int(5)]);
    }

    #[test]
    fn test_anagrams_probe_past_each_other() {
        let mut table = fixed(16);
        table.insert("listen", 1).unwrap();
        table.insert("silent", 2).unwrap();
        let first = table.slot_of("listen").unwrap();
        assert_eq!(table.slot_of("silent"), Some((first + 1) % 16));
        assert!(table.remove("listen"));
        assert_eq!(table.slot_of("silent"), Some(first));
    }
}
