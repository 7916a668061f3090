//! The region-chained bump allocator.

use std::cell::Cell;
use std::fmt;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::raw::RegionChain;
use crate::region::{round_up, Region};

/// A bump allocator over a chain of fixed-capacity regions.
///
/// Allocation takes `&self` and returns a slice borrowed from the arena, so
/// any number of allocations can be live at once. Individual allocations
/// are never freed; [`free_all`](Self::free_all) rewinds every region for
/// reuse and [`delete`](Self::delete) returns the memory to the system.
/// Both take `&mut self`, so no slice outlives them.
///
/// Regions are filled in order. Once the arena moves past a region it does
/// not return to it before the next `free_all`, even if a later request
/// would fit in its tail.
///
/// ```
/// use cdata_arena::Arena;
///
/// let arena = Arena::new();
/// let word = arena.strdup("hello").unwrap();
/// let bytes = arena.alloc(16).unwrap();
/// bytes[0] = 1;
/// assert_eq!(word, "hello");
/// assert_eq!(arena.region_count(), 1);
/// ```
pub struct Arena {
    regions: RegionChain,
    /// Index of the region allocation resumes from.
    current: Cell<usize>,
    config: ArenaConfig,
}

impl Arena {
    /// Create an empty arena with the default config. No memory is
    /// allocated until the first request.
    pub fn new() -> Self {
        Self {
            regions: RegionChain::new(),
            current: Cell::new(0),
            config: ArenaConfig::default(),
        }
    }

    /// Create an empty arena from an explicit configuration.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            regions: RegionChain::new(),
            current: Cell::new(0),
            config,
        })
    }

    /// The arena's configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Allocate `size` zeroed bytes, aligned to `size_of::<usize>()`.
    ///
    /// Consumes `size` rounded up to that alignment. Scans forward from the
    /// current region for one with enough room; failing that, appends a new
    /// region of `max(rounded size, region_capacity)` bytes and makes it
    /// current.
    ///
    /// # Errors
    ///
    /// [`ArenaError::CapacityExceeded`] when a new region is needed but the
    /// region limit is reached. [`ArenaError::AllocationFailed`] when the
    /// system allocator refuses the region.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> Result<&mut [u8], ArenaError> {
        let rounded = round_up(size).ok_or(ArenaError::AllocationFailed { bytes: size })?;

        let count = self.regions.len();
        for index in self.current.get()..count {
            if let Some(bytes) = self.regions.carve(index, rounded) {
                self.current.set(index);
                return Ok(&mut bytes[..size]);
            }
        }

        let index = self.push_region(rounded, size)?;
        let bytes = self
            .regions
            .carve(index, rounded)
            .ok_or(ArenaError::AllocationFailed { bytes: size })?;
        Ok(&mut bytes[..size])
    }

    /// Copy `text` into the arena.
    pub fn strdup(&self, text: &str) -> Result<&str, ArenaError> {
        let bytes = self.memdup(text.as_bytes())?;
        // A byte-for-byte copy of a `str` is valid UTF-8.
        std::str::from_utf8(bytes).map_err(|_| ArenaError::AllocationFailed {
            bytes: text.len(),
        })
    }

    /// Copy at most `len` bytes of `text` into the arena.
    ///
    /// A cut that would split a character moves back to the previous
    /// character boundary.
    pub fn strndup(&self, text: &str, len: usize) -> Result<&str, ArenaError> {
        let mut end = len.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.strdup(&text[..end])
    }

    /// Copy `data` into the arena.
    #[allow(clippy::mut_from_ref)]
    pub fn memdup(&self, data: &[u8]) -> Result<&mut [u8], ArenaError> {
        let bytes = self.alloc(data.len())?;
        bytes.copy_from_slice(data);
        Ok(bytes)
    }

    /// Rewind every region so its memory can be handed out again.
    ///
    /// Keeps all regions; the next allocation starts at region 0. Reused
    /// bytes are zeroed again when allocated.
    pub fn free_all(&mut self) {
        tracing::trace!(
            regions = self.regions.len(),
            used = self.regions.used_bytes(),
            "arena rewound"
        );
        self.regions.reset();
        self.current.set(0);
    }

    /// Free every region, returning the arena to its freshly created state.
    ///
    /// The arena stays usable; the next allocation creates a new region.
    pub fn delete(&mut self) {
        tracing::trace!(
            regions = self.regions.len(),
            capacity = self.regions.capacity_bytes(),
            "arena released"
        );
        self.regions.clear();
        self.current.set(0);
    }

    /// Number of regions currently held.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Bytes consumed by live allocations, including alignment padding.
    pub fn used_bytes(&self) -> usize {
        self.regions.used_bytes()
    }

    /// Total capacity of all regions in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.regions.capacity_bytes()
    }

    /// Append a region large enough for `rounded` bytes and make it current.
    fn push_region(&self, rounded: usize, requested: usize) -> Result<usize, ArenaError> {
        let count = self.regions.len();
        if self.config.max_regions.is_some_and(|max| count >= max) {
            return Err(ArenaError::CapacityExceeded {
                requested,
                regions: count,
            });
        }
        let capacity = rounded.max(self.config.region_capacity);
        let index = self.regions.push(Region::new(capacity)?);
        self.current.set(index);
        tracing::debug!(index, capacity, "arena region created");
        Ok(index)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("regions", &self.regions.len())
            .field("current", &self.current.get())
            .field("used_bytes", &self.regions.used_bytes())
            .field("capacity_bytes", &self.regions.capacity_bytes())
            .field("config", &self.config)
            .finish()
    }
}
