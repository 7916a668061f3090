//! Growable contiguous buffer.
//!
//! A [`Buffer`] is an ordered sequence with amortised O(1) append. Capacity
//! grows by a fixed factor (default 2×) when a push would overflow it and
//! never shrinks on its own. Head and arbitrary-position edits move the tail
//! in a single bulk shift.
//!
//! Every growing operation is fallible. On `Err` the buffer is unchanged:
//! the old elements are still there, in order, with the old capacity.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::BufferConfig;
use crate::error::StorageError;
use crate::search::SortedInsert;
use crate::storage::Storage;

/// Contiguous, resizable sequence of `T`.
#[derive(Clone)]
pub struct Buffer<T> {
    storage: Storage<T>,
    growth_factor: usize,
}

impl<T> Buffer<T> {
    /// Create an empty buffer with the default capacity (512).
    pub fn new() -> Result<Self, StorageError> {
        Self::with_config(BufferConfig::default())
    }

    /// Create an empty buffer with room for `initial_capacity` elements.
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, StorageError> {
        Self::with_config(BufferConfig::new(initial_capacity))
    }

    /// Create an empty buffer from an explicit configuration.
    pub fn with_config(config: BufferConfig) -> Result<Self, StorageError> {
        config.validate()?;
        Ok(Self {
            storage: Storage::with_capacity(config.initial_capacity, config.max_capacity)?,
            growth_factor: config.growth_factor,
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Number of elements the buffer can hold before it must grow.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The configured capacity limit, if any.
    pub fn max_capacity(&self) -> Option<usize> {
        self.storage.limit()
    }

    /// Whether `index` addresses a live element.
    pub fn index_is_valid(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Append `value` at the tail, growing if needed.
    pub fn push(&mut self, value: T) -> Result<(), StorageError> {
        self.grow_for(self.len() + 1)?;
        self.storage.push(value);
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.storage.pop()
    }

    /// Remove and return the first element, shifting the rest down.
    pub fn shift(&mut self) -> Option<T> {
        self.storage.remove(0)
    }

    /// Insert `value` at the head, shifting the rest up.
    pub fn unshift(&mut self, value: T) -> Result<(), StorageError> {
        self.grow_for(self.len() + 1)?;
        self.storage.insert(0, value);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the tail down.
    ///
    /// Returns `None` (and leaves the buffer alone) for an invalid index.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.storage.remove(index)
    }

    /// Index of the first element for which `compare(key, element)` is `Equal`.
    pub fn sequential_search<K, F>(&self, key: &K, mut compare: F) -> Option<usize>
    where
        K: ?Sized,
        F: FnMut(&K, &T) -> Ordering,
    {
        self.iter()
            .position(|element| compare(key, element) == Ordering::Equal)
    }

    /// Binary search a buffer sorted by `compare`.
    ///
    /// `Ok(index)` when an element compares equal to `key`; otherwise
    /// `Err(position)`, where inserting at `position` keeps the order. See
    /// [`search::encode_missing`](crate::search::encode_missing) for the
    /// single-integer form.
    pub fn binary_search<K, F>(&self, key: &K, mut compare: F) -> Result<usize, usize>
    where
        K: ?Sized,
        F: FnMut(&K, &T) -> Ordering,
    {
        let items = self.as_slice();
        let mut low = 0;
        let mut high = items.len();
        while low < high {
            let mid = low + (high - low) / 2;
            match compare(key, &items[mid]) {
                Ordering::Less => high = mid,
                Ordering::Greater => low = mid + 1,
                Ordering::Equal => return Ok(mid),
            }
        }
        Err(low)
    }

    /// Insert `value` at its sorted position unless an equal element exists.
    pub fn insert_sorted<F>(&mut self, value: T, mut compare: F) -> Result<SortedInsert, StorageError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self.binary_search(&value, &mut compare) {
            Ok(index) => Ok(SortedInsert::AlreadyPresent(index)),
            Err(position) => {
                self.grow_for(self.len() + 1)?;
                self.storage.insert(position, value);
                Ok(SortedInsert::Inserted(position))
            }
        }
    }

    /// Sort in place by `compare` (stable).
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.storage.as_mut_slice().sort_by(compare);
    }

    /// Raise the capacity to exactly `new_capacity`.
    ///
    /// Requests at or below the current capacity are a no-op. On failure the
    /// buffer keeps its old capacity and contents.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), StorageError> {
        self.storage.reserve_exact_to(new_capacity).map(drop)
    }

    /// Drop every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Append clones of every element of `values`, growing at most once.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.grow_for(self.len() + values.len())?;
        for value in values {
            self.storage.push(value.clone());
        }
        Ok(())
    }

    /// Element at `index`, if valid.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, if valid.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// First element.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutable last element.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the elements in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Consume the buffer, keeping its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    fn grow_for(&mut self, required: usize) -> Result<(), StorageError> {
        self.storage.grow_for(required, self.growth_factor).map(drop)
    }
}

impl<T: Default> Buffer<T> {
    /// Insert `value` at `index`.
    ///
    /// Within `0..=len` the tail shifts up by one. Past the end, the gap
    /// `len..index` is filled with `T::default()` and the length becomes
    /// `index + 1`.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), StorageError> {
        let len = self.len();
        let new_len = index
            .max(len)
            .checked_add(1)
            .ok_or(StorageError::CapacityOverflow)?;
        self.grow_for(new_len)?;
        if index <= len {
            self.storage.insert(index, value);
        } else {
            self.storage.fill_default_to(index);
            self.storage.push(value);
        }
        Ok(())
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("items", &self.as_slice())
            .finish()
    }
}
