//! cdata: a growable buffer, an open-addressing hash table and a
//! region-chained arena.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the cdata sub-crates. For most users, adding `cdata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! Count words with a hash table whose keys live in an arena:
//!
//! ```rust
//! use cdata::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct Word<'a> {
//!     text: &'a str,
//!     count: usize,
//! }
//!
//! let arena = Arena::new();
//! let mut table = HashTable::new(
//!     |w: &Word<'_>| w.text.bytes().fold(5381u64, |h, b| h.wrapping_mul(33).wrapping_add(u64::from(b))),
//!     |a: &Word<'_>, b: &Word<'_>| a.text.cmp(b.text),
//! )
//! .unwrap();
//!
//! for token in "the quick the fox the".split_whitespace() {
//!     let word = Word { text: arena.strdup(token).unwrap(), count: 1 };
//!     if let Insert::Present(existing) = table.insert(word).unwrap() {
//!         existing.count += 1;
//!     }
//! }
//!
//! let mut counted = table.to_array().unwrap();
//! counted.sort_by(|a, b| b.count.cmp(&a.count));
//! assert_eq!(counted.len(), 3);
//! assert_eq!((counted[0].text, counted[0].count), ("the", 3));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`collections`] | `cdata-collections` | `Buffer`, `HashTable`, configs, `StorageError` |
//! | [`arena`] | `cdata-arena` | `Arena`, `ArenaConfig`, `ArenaError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Growable buffer and open-addressing hash table (`cdata-collections`).
///
/// [`collections::Buffer`] for ordered sequences with sequential, binary
/// and sorted-insert search; [`collections::HashTable`] for keyed records.
pub use cdata_collections as collections;

/// Region-chained bump allocator (`cdata-arena`).
///
/// [`arena::Arena`] hands out zeroed byte slices and string copies that
/// live until the arena is rewound or released.
pub use cdata_arena as arena;

/// Common imports for typical cdata usage.
///
/// ```rust
/// use cdata::prelude::*;
/// ```
///
/// This imports the three containers, their configs and error types.
pub mod prelude {
    // Containers
    pub use cdata_arena::Arena;
    pub use cdata_collections::{Buffer, HashTable, Insert, SortedInsert};

    // Configuration
    pub use cdata_arena::ArenaConfig;
    pub use cdata_collections::{BufferConfig, LoadFactor, Probing, TableConfig};

    // Errors
    pub use cdata_arena::ArenaError;
    pub use cdata_collections::{ConfigError, StorageError};
}
