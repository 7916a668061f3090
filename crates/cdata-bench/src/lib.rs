//! Benchmark fixtures and the word-count demo for cdata.
//!
//! - [`corpus`]: deterministic synthetic text from a seeded ChaCha8 RNG
//! - [`count`]: the three word-counting strategies (sequential search,
//!   sorted insert, hash table) over arena-owned words
//! - [`cli`]: the `clap` command line of the `count_words` example

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cli;
pub mod corpus;
pub mod count;

pub use corpus::{generate, CorpusSpec};
pub use cli::Cli;
pub use count::{count_words, CountError, Strategy, WordCount};
