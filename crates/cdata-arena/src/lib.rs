//! Region-chained bump allocation.
//!
//! An [`Arena`] hands out zeroed, word-aligned byte slices from a chain of
//! fixed-capacity regions. Nothing is freed individually: the whole arena
//! is rewound with [`Arena::free_all`] or released with [`Arena::delete`].
//! This crate is the only one in the workspace that contains `unsafe`, and
//! all of it lives in `raw.rs`.
//!
//! # Architecture
//!
//! ```text
//! Arena (policy: region choice, limits, string helpers)
//! ├── RegionChain (UnsafeCell<Vec<Region>>, appendable through &self)
//! │   └── Region → RawRegion (word-aligned heap block, bump cursor)
//! ├── current: Cell<usize> (region allocation resumes from)
//! └── ArenaConfig (region_capacity, max_regions)
//! ```
//!
//! # Lifetimes
//!
//! Allocations borrow the arena immutably, so they coexist freely and die
//! before any `&mut self` call (`free_all`, `delete`, drop) can reuse or
//! release their memory.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
mod raw;
pub mod region;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
