//! Fixed-capacity memory regions.
//!
//! A [`Region`] is one heap block plus a bump cursor. Regions never grow;
//! the arena chains new ones instead. Offsets handed out are always
//! multiples of [`ALIGN`] because every request is rounded up first.

use crate::error::ArenaError;
use crate::raw::RawRegion;

/// Alignment of every allocation and the unit consumption is rounded to.
pub const ALIGN: usize = std::mem::size_of::<usize>();

/// Round `size` up to a multiple of [`ALIGN`], or `None` on overflow.
pub fn round_up(size: usize) -> Option<usize> {
    size.checked_next_multiple_of(ALIGN)
}

/// A single heap block with bump allocation.
#[derive(Debug)]
pub(crate) struct Region {
    /// Backing block. Its address is stable for the region's lifetime.
    pub(crate) raw: RawRegion,
    /// Bytes consumed from the front of the block.
    occupied: usize,
}

impl Region {
    /// Allocate a region of `capacity` bytes (non-zero).
    pub(crate) fn new(capacity: usize) -> Result<Self, ArenaError> {
        let raw = RawRegion::allocate(capacity)
            .ok_or(ArenaError::AllocationFailed { bytes: capacity })?;
        Ok(Self { raw, occupied: 0 })
    }

    /// Claim `len` bytes, returning their offset, or `None` if they do not
    /// fit in what is left.
    pub(crate) fn advance(&mut self, len: usize) -> Option<usize> {
        if len > self.remaining() {
            return None;
        }
        let offset = self.occupied;
        self.occupied += len;
        Some(offset)
    }

    /// Forget every allocation. The memory is re-zeroed as it is handed out
    /// again.
    pub(crate) fn reset(&mut self) {
        self.occupied = 0;
    }

    pub(crate) fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    pub(crate) fn remaining(&self) -> usize {
        self.raw.capacity() - self.occupied
    }
}
