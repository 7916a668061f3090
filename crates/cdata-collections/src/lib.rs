//! Growable buffer and open-addressing hash table.
//!
//! Both containers sit on one storage primitive that tracks capacity
//! explicitly and reserves memory fallibly, so running out of memory (or
//! past a configured limit) is a recoverable `Err` rather than an abort.
//!
//! # Architecture
//!
//! ```text
//! Buffer<T>                     HashTable<T, H, C>
//! └── Storage<T>                ├── Storage<T> (power-of-two slots, default-filled)
//!     (len ≤ capacity,          ├── Bitset (occupancy, one bit per slot)
//!      geometric growth)        └── ProbeSeq (linear or triangular)
//! ```
//!
//! # Failure model
//!
//! Every growing operation returns `Result<_, StorageError>`. On `Err` the
//! container is exactly as it was before the call: same elements, same
//! order, same capacity.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bitset;
pub mod buffer;
pub mod config;
pub mod error;
pub mod hash_table;
mod probe;
pub mod search;
mod storage;

// Public re-exports for the primary API surface.
pub use bitset::Bitset;
pub use buffer::Buffer;
pub use config::{BufferConfig, LoadFactor, Probing, TableConfig};
pub use error::{ConfigError, StorageError};
pub use hash_table::{HashTable, Insert};
pub use search::SortedInsert;
