//! The growable slot storage shared by [`Buffer`](crate::Buffer) and
//! [`HashTable`](crate::HashTable).
//!
//! [`Storage`] tracks its logical capacity separately from the `Vec` it
//! wraps, so growth follows the configured factor rather than whatever the
//! allocator hands back. All reservation goes through `try_reserve_exact`:
//! a refused allocation surfaces as a [`StorageError`] and leaves the stored
//! elements exactly where they were.

use crate::error::StorageError;

/// Contiguous slots with explicit, monotonically growing capacity.
#[derive(Debug)]
pub(crate) struct Storage<T> {
    /// Live elements. `items.len() <= capacity` always.
    items: Vec<T>,
    /// Logical capacity in elements. The `Vec` has reserved at least this.
    capacity: usize,
    /// Upper bound on `capacity`, if configured.
    limit: Option<usize>,
}

impl<T> Storage<T> {
    /// Reserve exactly `capacity` slots, holding no elements yet.
    pub(crate) fn with_capacity(capacity: usize, limit: Option<usize>) -> Result<Self, StorageError> {
        check_limit(capacity, limit)?;
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| StorageError::reserve_failed::<T>(capacity))?;
        Ok(Self {
            items,
            capacity,
            limit,
        })
    }

    /// Number of live elements.
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Logical capacity in elements.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// The configured capacity limit.
    pub(crate) fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Smallest capacity reachable from the current one by repeated
    /// multiplication with `growth_factor` that holds `required` elements.
    ///
    /// Clamped to the limit when the limit itself is large enough.
    pub(crate) fn next_capacity(
        &self,
        required: usize,
        growth_factor: usize,
    ) -> Result<usize, StorageError> {
        check_limit(required, self.limit)?;
        let mut capacity = self.capacity.max(1);
        while capacity < required {
            capacity = capacity
                .checked_mul(growth_factor)
                .ok_or(StorageError::CapacityOverflow)?;
        }
        Ok(match self.limit {
            Some(limit) => capacity.min(limit),
            None => capacity,
        })
    }

    /// Make room for `required` elements, growing geometrically.
    ///
    /// Returns `true` if the capacity changed.
    pub(crate) fn grow_for(
        &mut self,
        required: usize,
        growth_factor: usize,
    ) -> Result<bool, StorageError> {
        if required <= self.capacity {
            return Ok(false);
        }
        let new_capacity = self.next_capacity(required, growth_factor)?;
        self.reserve_exact_to(new_capacity)
    }

    /// Raise the capacity to exactly `new_capacity`.
    ///
    /// Requests at or below the current capacity are a no-op and return
    /// `Ok(false)`; capacity never shrinks.
    pub(crate) fn reserve_exact_to(&mut self, new_capacity: usize) -> Result<bool, StorageError> {
        if new_capacity <= self.capacity {
            return Ok(false);
        }
        check_limit(new_capacity, self.limit)?;
        let additional = new_capacity - self.items.len();
        self.items
            .try_reserve_exact(additional)
            .map_err(|_| StorageError::reserve_failed::<T>(new_capacity))?;
        tracing::trace!(
            from = self.capacity,
            to = new_capacity,
            len = self.items.len(),
            "storage grown"
        );
        self.capacity = new_capacity;
        Ok(true)
    }

    /// Append without growing. Callers grow first.
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(self.items.len() < self.capacity, "push past capacity");
        self.items.push(value);
    }

    /// Insert at `index <= len` without growing, shifting the tail in one move.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        debug_assert!(self.items.len() < self.capacity, "insert past capacity");
        self.items.insert(index, value);
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Remove the element at `index`, shifting the tail down in one move.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drop every element, keeping the capacity.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Default> Storage<T> {
    /// Storage whose every slot holds `T::default()`.
    pub(crate) fn filled(capacity: usize, limit: Option<usize>) -> Result<Self, StorageError> {
        let mut storage = Self::with_capacity(capacity, limit)?;
        storage.items.resize_with(capacity, T::default);
        Ok(storage)
    }

    /// Append default values until `len == new_len`. Callers grow first.
    pub(crate) fn fill_default_to(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity, "fill past capacity");
        if new_len > self.items.len() {
            self.items.resize_with(new_len, T::default);
        }
    }
}

impl<T: Clone> Clone for Storage<T> {
    /// Reserves the full logical capacity in the copy, so pushes that fit it
    /// never reallocate. If that reservation is refused the copy keeps only
    /// as much capacity as it holds elements.
    fn clone(&self) -> Self {
        let mut items = Vec::new();
        let capacity = match items.try_reserve_exact(self.capacity) {
            Ok(()) => self.capacity,
            Err(_) => self.items.len(),
        };
        items.extend_from_slice(&self.items);
        Self {
            items,
            capacity,
            limit: self.limit,
        }
    }
}

/// Reject capacities above the configured limit.
pub(crate) fn check_limit(requested: usize, limit: Option<usize>) -> Result<(), StorageError> {
    match limit {
        Some(limit) if requested > limit => Err(StorageError::CapacityExceeded { requested, limit }),
        _ => Ok(()),
    }
}
