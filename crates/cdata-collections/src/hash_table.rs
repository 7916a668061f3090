//! Open-addressing hash table.
//!
//! [`HashTable`] keeps every entry directly in a power-of-two slot array
//! ([`Storage`]) with a separate occupancy [`Bitset`]. Keys are whole
//! records: the table hashes and compares `T` values through the functions
//! it was built with, so a record such as `{ word, count }` can be keyed on
//! `word` alone.
//!
//! # Invariants
//!
//! - `occupied[i]` is set iff `slots[i]` holds a live entry; every other
//!   slot holds `T::default()`.
//! - `capacity` is a power of two.
//! - After every insert, `len * denominator <= numerator * capacity`, so at
//!   least one slot is always empty and a lookup miss ends at it.
//!
//! There is no removal. Without deletions no tombstones are needed and a
//! probe can stop at the first empty slot.

use std::cmp::Ordering;
use std::fmt;

use crate::bitset::Bitset;
use crate::buffer::Buffer;
use crate::config::{BufferConfig, LoadFactor, Probing, TableConfig};
use crate::error::StorageError;
use crate::probe::ProbeSeq;
use crate::storage::Storage;

/// Where a probe for a key ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    /// An occupied slot whose entry compares equal to the key.
    Occupied(usize),
    /// The first empty slot on the key's probe sequence.
    Vacant(usize),
}

/// Outcome of [`HashTable::insert`].
#[derive(Debug)]
#[must_use]
pub enum Insert<'a, T> {
    /// The key was absent; the value now lives in this slot.
    Inserted(&'a mut T),
    /// An equal key was already stored; the table is unchanged and the
    /// value passed to `insert` has been dropped.
    Present(&'a mut T),
}

impl<'a, T> Insert<'a, T> {
    /// The stored entry, new or existing.
    pub fn into_mut(self) -> &'a mut T {
        match self {
            Self::Inserted(entry) | Self::Present(entry) => entry,
        }
    }

    /// Whether the table gained an entry.
    pub fn inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Open-addressing hash table over records of type `T`.
///
/// `H` maps a record to its hash; `C` orders two records by key and must
/// return `Equal` exactly when their keys match. Both are bound at
/// construction and used for every lookup, insert and resize.
pub struct HashTable<T, H, C> {
    slots: Storage<T>,
    occupied: Bitset,
    len: usize,
    hash_fn: H,
    compare_fn: C,
    growth_factor: usize,
    load_factor: LoadFactor,
    probing: Probing,
}

impl<T, H, C> HashTable<T, H, C>
where
    T: Default,
    H: Fn(&T) -> u64,
    C: Fn(&T, &T) -> Ordering,
{
    /// Create a table with the default capacity (512).
    pub fn new(hash_fn: H, compare_fn: C) -> Result<Self, StorageError> {
        Self::with_config(hash_fn, compare_fn, TableConfig::default())
    }

    /// Create a table with at least `initial_capacity` slots (rounded up to
    /// a power of two).
    pub fn with_capacity(
        hash_fn: H,
        compare_fn: C,
        initial_capacity: usize,
    ) -> Result<Self, StorageError> {
        Self::with_config(hash_fn, compare_fn, TableConfig::new(initial_capacity))
    }

    /// Create a table from an explicit configuration.
    pub fn with_config(hash_fn: H, compare_fn: C, config: TableConfig) -> Result<Self, StorageError> {
        config.validate()?;
        let capacity = config
            .rounded_capacity()
            .ok_or(StorageError::CapacityOverflow)?;
        Ok(Self {
            slots: Storage::filled(capacity, config.max_capacity)?,
            occupied: Bitset::with_len(capacity)?,
            len: 0,
            hash_fn,
            compare_fn,
            growth_factor: config.growth_factor,
            load_factor: config.load_factor,
            probing: config.probing,
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Current ratio of entries to slots.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// The probing scheme in use.
    pub fn probing(&self) -> Probing {
        self.probing
    }

    /// Look up the entry whose key equals `key`'s.
    pub fn get(&self, key: &T) -> Option<&T> {
        match self.locate_key(key)? {
            Slot::Occupied(index) => Some(&self.slots.as_slice()[index]),
            Slot::Vacant(_) => None,
        }
    }

    /// Mutable lookup. Mutating the key fields of the returned entry breaks
    /// later lookups for it.
    pub fn get_mut(&mut self, key: &T) -> Option<&mut T> {
        match self.locate_key(key)? {
            Slot::Occupied(index) => Some(&mut self.slots.as_mut_slice()[index]),
            Slot::Vacant(_) => None,
        }
    }

    /// Whether an entry with `key`'s key is stored.
    pub fn contains(&self, key: &T) -> bool {
        self.get(key).is_some()
    }

    /// Look up by a precomputed hash and an equality predicate.
    ///
    /// `hash` must be what the table's hash function returns for the entry
    /// being sought. Useful when the probe key is a borrowed form of the
    /// stored record, such as a token from a read buffer.
    pub fn find<F>(&self, hash: u64, eq: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        match self.locate(hash, eq)? {
            Slot::Occupied(index) => Some(&self.slots.as_slice()[index]),
            Slot::Vacant(_) => None,
        }
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut<F>(&mut self, hash: u64, eq: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        match self.locate(hash, eq)? {
            Slot::Occupied(index) => Some(&mut self.slots.as_mut_slice()[index]),
            Slot::Vacant(_) => None,
        }
    }

    /// Insert `value` unless an entry with the same key is stored.
    ///
    /// If holding one more entry would break the load factor, the table is
    /// resized first. A failed resize returns `Err` with the table exactly
    /// as it was.
    pub fn insert(&mut self, value: T) -> Result<Insert<'_, T>, StorageError> {
        if !self.load_factor.admits(self.len + 1, self.capacity()) {
            self.grow_for(self.len + 1)?;
        }
        match self.locate_key(&value) {
            Some(Slot::Occupied(index)) => {
                Ok(Insert::Present(&mut self.slots.as_mut_slice()[index]))
            }
            Some(Slot::Vacant(index)) => {
                let slot = &mut self.slots.as_mut_slice()[index];
                *slot = value;
                self.occupied.set(index);
                self.len += 1;
                Ok(Insert::Inserted(slot))
            }
            None => Err(StorageError::TableFull {
                capacity: self.capacity(),
            }),
        }
    }

    /// Iterate over entries in ascending slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.as_slice(),
            occupied: &self.occupied,
            next: 0,
            remaining: self.len,
        }
    }

    /// Iterate mutably over entries in ascending slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            slots: self.slots.as_mut_slice().iter_mut().enumerate(),
            occupied: &self.occupied,
            remaining: self.len,
        }
    }

    /// Copy every entry, in slot order, into a new buffer.
    ///
    /// The buffer starts with the table's capacity.
    pub fn to_array(&self) -> Result<Buffer<T>, StorageError>
    where
        T: Clone,
    {
        let config = BufferConfig::new(self.capacity()).with_growth_factor(self.growth_factor);
        let mut buffer = Buffer::with_config(config)?;
        for entry in self.iter() {
            buffer.push(entry.clone())?;
        }
        Ok(buffer)
    }

    /// Move every entry, in slot order, into a new buffer sized to fit.
    pub fn into_buffer(self) -> Result<Buffer<T>, StorageError> {
        let config = BufferConfig::new(self.len).with_growth_factor(self.growth_factor);
        let mut buffer = Buffer::with_config(config)?;
        let occupied = self.occupied;
        for (index, entry) in self.slots.into_vec().into_iter().enumerate() {
            if occupied.test(index) {
                buffer.push(entry)?;
            }
        }
        Ok(buffer)
    }

    /// Drop every entry, keeping the capacity.
    pub fn clear(&mut self) {
        let slots = self.slots.as_mut_slice();
        let mut index = 0;
        while let Some(found) = self.occupied.next_set(index) {
            slots[found] = T::default();
            index = found + 1;
        }
        self.occupied.clear_all();
        self.len = 0;
    }

    fn locate_key(&self, key: &T) -> Option<Slot> {
        let compare = &self.compare_fn;
        self.locate((self.hash_fn)(key), |entry| {
            compare(key, entry) == Ordering::Equal
        })
    }

    /// Walk the probe sequence for `hash` until `eq` matches or a slot is
    /// empty. `None` means every slot was visited (the table is full).
    fn locate<F>(&self, hash: u64, mut eq: F) -> Option<Slot>
    where
        F: FnMut(&T) -> bool,
    {
        let slots = self.slots.as_slice();
        for index in ProbeSeq::new(hash, self.capacity(), self.probing) {
            if !self.occupied.test(index) {
                return Some(Slot::Vacant(index));
            }
            if eq(&slots[index]) {
                return Some(Slot::Occupied(index));
            }
        }
        None
    }

    /// Grow until `required` entries fit the load factor.
    fn grow_for(&mut self, required: usize) -> Result<(), StorageError> {
        let mut capacity = self.capacity();
        while !self.load_factor.admits(required, capacity) {
            capacity = capacity
                .checked_mul(self.growth_factor)
                .and_then(usize::checked_next_power_of_two)
                .ok_or(StorageError::CapacityOverflow)?;
        }
        self.rehash_into(capacity)
    }

    /// Move every entry into fresh storage of `new_capacity` slots.
    fn rehash_into(&mut self, new_capacity: usize) -> Result<(), StorageError> {
        // Allocate everything before touching an entry so a refusal leaves
        // the table as it was.
        let mut slots = Storage::<T>::filled(new_capacity, self.slots.limit())?;
        let mut occupied = Bitset::with_len(new_capacity)?;

        let mut moves = Vec::new();
        moves
            .try_reserve_exact(self.len)
            .map_err(|_| StorageError::reserve_failed::<(usize, usize)>(self.len))?;

        // Place every entry before moving any, so running out of slots
        // also leaves the table as it was.
        let old_slots = self.slots.as_slice();
        let mut index = 0;
        while let Some(found) = self.occupied.next_set(index) {
            let hash = (self.hash_fn)(&old_slots[found]);
            // Keys are unique, so only an empty slot is needed.
            let target = ProbeSeq::new(hash, new_capacity, self.probing)
                .find(|&candidate| !occupied.test(candidate))
                .ok_or(StorageError::TableFull {
                    capacity: new_capacity,
                })?;
            occupied.set(target);
            moves.push((found, target));
            index = found + 1;
        }

        let old_capacity = self.capacity();
        let new_slots = slots.as_mut_slice();
        let old_slots = self.slots.as_mut_slice();
        for (from, to) in moves {
            new_slots[to] = std::mem::take(&mut old_slots[from]);
        }

        self.slots = slots;
        self.occupied = occupied;
        tracing::debug!(
            from = old_capacity,
            to = new_capacity,
            len = self.len,
            "hash table resized"
        );
        Ok(())
    }
}

impl<'a, T, H, C> IntoIterator for &'a HashTable<T, H, C>
where
    T: Default,
    H: Fn(&T) -> u64,
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, H, C> fmt::Debug for HashTable<T, H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = Vec::with_capacity(self.len);
        let mut index = 0;
        while let Some(found) = self.occupied.next_set(index) {
            entries.push((found, &self.slots.as_slice()[found]));
            index = found + 1;
        }
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("capacity", &self.slots.capacity())
            .field("probing", &self.probing)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

/// Iterator over occupied slots of a [`HashTable`], in slot order.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    slots: &'a [T],
    occupied: &'a Bitset,
    next: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.occupied.next_set(self.next)?;
        self.next = index + 1;
        self.remaining -= 1;
        Some(&self.slots[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable iterator over occupied slots of a [`HashTable`], in slot order.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    slots: std::iter::Enumerate<std::slice::IterMut<'a, T>>,
    occupied: &'a Bitset,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let occupied = self.occupied;
        let (_, entry) = self.slots.find(|(index, _)| occupied.test(*index))?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Entry {
        key: u64,
        value: u32,
    }

    fn entry(key: u64, value: u32) -> Entry {
        Entry { key, value }
    }

    type EntryTable = HashTable<Entry, fn(&Entry) -> u64, fn(&Entry, &Entry) -> Ordering>;

    fn by_key(a: &Entry, b: &Entry) -> Ordering {
        a.key.cmp(&b.key)
    }

    fn identity_hash(e: &Entry) -> u64 {
        e.key
    }

    fn table(capacity: usize) -> EntryTable {
        table_with(TableConfig::new(capacity))
    }

    fn table_with(config: TableConfig) -> EntryTable {
        HashTable::with_config(
            identity_hash as fn(&Entry) -> u64,
            by_key as fn(&Entry, &Entry) -> Ordering,
            config,
        )
        .unwrap()
    }

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        assert_eq!(table(100).capacity(), 128);
        assert_eq!(table(0).capacity(), 1);
        assert_eq!(table(64).capacity(), 64);
    }

    #[test]
    fn insert_then_get() {
        let mut t = table(8);
        assert!(t.insert(entry(3, 30)).unwrap().inserted());
        assert_eq!(t.get(&entry(3, 0)), Some(&entry(3, 30)));
        assert_eq!(t.get(&entry(4, 0)), None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn duplicate_insert_returns_existing_entry() {
        let mut t = table(8);
        let _ = t.insert(entry(1, 10)).unwrap();
        match t.insert(entry(1, 99)).unwrap() {
            Insert::Present(existing) => {
                assert_eq!(existing.value, 10);
                existing.value += 1;
            }
            Insert::Inserted(_) => panic!("expected Present"),
        }
        assert_eq!(t.get(&entry(1, 0)).unwrap().value, 11);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn collisions_probe_linearly() {
        let mut t = table(8);
        // 1, 9 and 17 share home slot 1.
        for key in [1, 9, 17] {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        let keys: Vec<u64> = t.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 9, 17]);
        assert!(t.contains(&entry(17, 0)));
    }

    #[test]
    fn collisions_probe_quadratically() {
        let mut t = table_with(TableConfig::new(16).with_probing(Probing::Quadratic));
        for key in [0, 16, 32] {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        // Slots 0, 1, 3.
        assert_eq!(t.slots.as_slice()[3].key, 32);
        assert!(t.contains(&entry(32, 0)));
    }

    #[test]
    fn resize_keeps_half_load_factor() {
        let mut t = table(4);
        for key in 0..100 {
            let _ = t.insert(entry(key, key as u32)).unwrap();
            assert!(t.len() * 2 <= t.capacity(), "len {} cap {}", t.len(), t.capacity());
            assert!(t.capacity().is_power_of_two());
        }
        for key in 0..100 {
            assert_eq!(t.get(&entry(key, 0)).unwrap().value, key as u32);
        }
    }

    #[test]
    fn growth_factor_four_rounds_to_power_of_two() {
        let mut t = table_with(TableConfig::new(4).with_growth_factor(4));
        for key in 0..3 {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        assert_eq!(t.capacity(), 16);
    }

    #[test]
    fn failed_resize_leaves_table_intact() {
        let mut t = table_with(TableConfig::new(4).with_max_capacity(4));
        let _ = t.insert(entry(1, 1)).unwrap();
        let _ = t.insert(entry(2, 2)).unwrap();
        let err = t.insert(entry(3, 3)).unwrap_err();
        assert_eq!(
            err,
            StorageError::CapacityExceeded {
                requested: 8,
                limit: 4
            }
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.get(&entry(1, 0)).unwrap().value, 1);
        assert_eq!(t.get(&entry(2, 0)).unwrap().value, 2);
    }

    #[test]
    fn rehash_without_room_keeps_entries() {
        let mut t = table(8);
        for key in 1..=3 {
            let _ = t.insert(entry(key, key as u32)).unwrap();
        }
        assert_eq!(
            t.rehash_into(2),
            Err(StorageError::TableFull { capacity: 2 })
        );
        assert_eq!(t.capacity(), 8);
        for key in 1..=3 {
            assert_eq!(t.get(&entry(key, 0)).unwrap().value, key as u32);
        }
    }

    #[test]
    fn find_by_hash_and_predicate() {
        let mut t = table(8);
        let _ = t.insert(entry(5, 50)).unwrap();
        assert_eq!(t.find(5, |e| e.key == 5).map(|e| e.value), Some(50));
        assert!(t.find(6, |e| e.key == 6).is_none());
        if let Some(e) = t.find_mut(5, |e| e.key == 5) {
            e.value = 51;
        }
        assert_eq!(t.get(&entry(5, 0)).unwrap().value, 51);
    }

    #[test]
    fn iteration_is_slot_ordered_and_restartable() {
        let mut t = table(16);
        for key in [9, 2, 14] {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        let first: Vec<u64> = t.iter().map(|e| e.key).collect();
        let second: Vec<u64> = (&t).into_iter().map(|e| e.key).collect();
        assert_eq!(first, vec![2, 9, 14]);
        assert_eq!(first, second);
        assert_eq!(t.iter().len(), 3);
    }

    #[test]
    fn iter_mut_updates_entries() {
        let mut t = table(16);
        for key in [1, 2, 3] {
            let _ = t.insert(entry(key, 1)).unwrap();
        }
        for e in t.iter_mut() {
            e.value *= 10;
        }
        assert!(t.iter().all(|e| e.value == 10));
    }

    #[test]
    fn to_array_snapshots_in_slot_order() {
        let mut t = table(8);
        for key in [7, 1, 4] {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        let array = t.to_array().unwrap();
        let keys: Vec<u64> = array.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 4, 7]);
        assert_eq!(array.capacity(), t.capacity());
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn into_buffer_moves_entries() {
        let mut t = table(8);
        for key in [3, 1] {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        let buffer = t.into_buffer().unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].key, 1);
    }

    #[test]
    fn clear_resets_entries_but_not_capacity() {
        let mut t = table(8);
        for key in 0..3 {
            let _ = t.insert(entry(key, 0)).unwrap();
        }
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), 8);
        assert!(t.get(&entry(1, 0)).is_none());
        assert_eq!(t.iter().count(), 0);
    }

    #[test]
    fn full_table_lookup_misses() {
        // A 1-slot table at 1/2 load factor can never fill, so force
        // fullness through the occupancy map directly.
        let mut t = table(2);
        t.occupied.set(0);
        t.occupied.set(1);
        assert!(t.get(&entry(5, 0)).is_none());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use indexmap::IndexMap;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn behaves_like_a_map(
                keys in proptest::collection::vec(0u64..512, 0..300),
                quadratic in any::<bool>(),
            ) {
                let probing = if quadratic { Probing::Quadratic } else { Probing::Linear };
                let mut t = table_with(TableConfig::new(1).with_probing(probing));
                let mut model: IndexMap<u64, u32> = IndexMap::new();
                for key in keys {
                    match t.insert(entry(key, 1)).unwrap() {
                        Insert::Inserted(_) => {
                            prop_assert!(model.insert(key, 1).is_none());
                        }
                        Insert::Present(existing) => {
                            existing.value += 1;
                            *model.get_mut(&key).unwrap() += 1;
                        }
                    }
                    prop_assert!(t.len() * 2 <= t.capacity());
                }
                prop_assert_eq!(t.len(), model.len());
                for (&key, &count) in &model {
                    prop_assert_eq!(t.get(&entry(key, 0)).map(|e| e.value), Some(count));
                }
                prop_assert_eq!(t.iter().count(), model.len());
            }

            #[test]
            fn never_inserted_keys_miss(
                keys in proptest::collection::hash_set(0u64..1000, 0..100),
                probe in 1000u64..2000,
            ) {
                let mut t = table(4);
                for &key in &keys {
                    let _ = t.insert(entry(key, 0)).unwrap();
                }
                prop_assert!(t.get(&entry(probe, 0)).is_none());
            }
        }
    }
}
