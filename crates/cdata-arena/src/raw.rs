//! Low-level primitives for arena memory operations.
//!
//! The only module in the crate that contains `unsafe`. It owns two things:
//!
//! - [`RawRegion`]: one heap block obtained from the global allocator with
//!   word alignment, freed on drop.
//! - [`RegionChain`]: the arena's list of regions behind an `UnsafeCell`,
//!   so that `&self` allocation can hand out `&mut [u8]` slices that live as
//!   long as the arena borrow.
//!
//! Every `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::cell::UnsafeCell;
use std::ptr::NonNull;

use crate::region::{Region, ALIGN};

/// An owned, word-aligned heap block of fixed size.
#[derive(Debug)]
pub(crate) struct RawRegion {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl RawRegion {
    /// Allocate `capacity` bytes. `None` if `capacity` is zero, too large
    /// for a `Layout`, or refused by the allocator.
    pub(crate) fn allocate(capacity: usize) -> Option<Self> {
        if capacity == 0 {
            return None;
        }
        let layout = Layout::from_size_align(capacity, ALIGN).ok()?;
        // SAFETY: `layout` has non-zero size, checked above.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr).map(|ptr| Self { ptr, layout })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.layout.size()
    }
}

impl Drop for RawRegion {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `alloc::alloc` with exactly `layout` and
        // is freed only here.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

// SAFETY: a `RawRegion` uniquely owns its block; moving it to another
// thread moves that ownership with it.
unsafe impl Send for RawRegion {}

/// The arena's regions, appendable through a shared reference.
///
/// Slices returned by [`carve`](Self::carve) point into region blocks, never
/// into the `Vec` itself, so appending (which may move the `Region` structs)
/// leaves them valid. Regions are reset or freed only through `&mut self`,
/// which the borrow checker forbids while any carved slice is alive.
///
/// `UnsafeCell` makes the chain `!Sync`; no method calls out to user code,
/// so no two accesses to the `Vec` ever overlap.
#[derive(Debug, Default)]
pub(crate) struct RegionChain {
    regions: UnsafeCell<Vec<Region>>,
}

impl RegionChain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn regions(&self) -> &Vec<Region> {
        // SAFETY: the chain is !Sync and no `&mut` to the Vec escapes a
        // method of this type, so no mutable access is live here.
        unsafe { &*self.regions.get() }
    }

    /// Number of regions.
    pub(crate) fn len(&self) -> usize {
        self.regions().len()
    }

    /// Sum of bytes consumed across all regions.
    pub(crate) fn used_bytes(&self) -> usize {
        self.regions().iter().map(Region::occupied).sum()
    }

    /// Sum of region capacities.
    pub(crate) fn capacity_bytes(&self) -> usize {
        self.regions().iter().map(Region::capacity).sum()
    }

    /// Append `region`, returning its index.
    pub(crate) fn push(&self, region: Region) -> usize {
        // SAFETY: as in `regions`; this `&mut` ends before the method
        // returns. Moving `Region` structs on reallocation does not move
        // their blocks, which is all carved slices point into.
        let regions = unsafe { &mut *self.regions.get() };
        regions.push(region);
        regions.len() - 1
    }

    /// Claim `len` zeroed bytes from region `index`.
    ///
    /// `None` if there is no such region or it lacks room.
    #[allow(clippy::mut_from_ref)]
    pub(crate) fn carve(&self, index: usize, len: usize) -> Option<&mut [u8]> {
        // SAFETY: as in `push`.
        let regions = unsafe { &mut *self.regions.get() };
        let region = regions.get_mut(index)?;
        let offset = region.advance(len)?;
        let base = region.raw.ptr.as_ptr();
        // SAFETY: `advance` succeeded, so `offset + len <= capacity` and the
        // range lies inside the block. The range was unclaimed until now and
        // cursors only move forward while `&self` borrows exist, so no other
        // live slice overlaps it. The block stays allocated until `reset`,
        // `clear` or drop, all of which need `&mut self` and so outlive the
        // returned borrow. Zeroing first makes every byte initialized.
        unsafe {
            let start = base.add(offset);
            std::ptr::write_bytes(start, 0, len);
            Some(std::slice::from_raw_parts_mut(start, len))
        }
    }

    /// Rewind every region's cursor, keeping the blocks.
    pub(crate) fn reset(&mut self) {
        self.regions.get_mut().iter_mut().for_each(Region::reset);
    }

    /// Free every block.
    pub(crate) fn clear(&mut self) {
        let regions = self.regions.get_mut();
        regions.clear();
        regions.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_with(capacities: &[usize]) -> RegionChain {
        let chain = RegionChain::new();
        for &capacity in capacities {
            chain.push(Region::new(capacity).unwrap());
        }
        chain
    }

    #[test]
    fn zero_sized_block_refused() {
        assert!(RawRegion::allocate(0).is_none());
    }

    #[test]
    fn blocks_are_word_aligned() {
        let raw = RawRegion::allocate(24).unwrap();
        assert_eq!(raw.ptr.as_ptr() as usize % ALIGN, 0);
        assert_eq!(raw.capacity(), 24);
    }

    #[test]
    fn carved_slices_are_disjoint_and_zeroed() {
        let chain = chain_with(&[64]);
        let a = chain.carve(0, 16).unwrap();
        let b = chain.carve(0, 16).unwrap();
        a.fill(0xAA);
        assert!(b.iter().all(|&byte| byte == 0));
        assert_eq!(b.as_ptr() as usize - a.as_ptr() as usize, 16);
        assert_eq!(chain.used_bytes(), 32);
    }

    #[test]
    fn slices_survive_chain_growth() {
        let chain = chain_with(&[16]);
        let first = chain.carve(0, 8).unwrap();
        first.copy_from_slice(b"survives");
        for _ in 0..32 {
            chain.push(Region::new(16).unwrap());
        }
        assert_eq!(first, b"survives");
    }

    #[test]
    fn carve_refuses_missing_or_full_region() {
        let chain = chain_with(&[8]);
        assert!(chain.carve(1, 8).is_none());
        assert!(chain.carve(0, 16).is_none());
        assert_eq!(chain.used_bytes(), 0);
    }

    #[test]
    fn reset_rezeroes_on_next_carve() {
        let mut chain = chain_with(&[8]);
        chain.carve(0, 8).unwrap().fill(0xFF);
        chain.reset();
        assert_eq!(chain.used_bytes(), 0);
        assert!(chain.carve(0, 8).unwrap().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn clear_frees_everything() {
        let mut chain = chain_with(&[8, 8]);
        chain.clear();
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.capacity_bytes(), 0);
    }
}
