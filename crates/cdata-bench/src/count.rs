//! Word-counting strategies over the cdata containers.
//!
//! Each strategy reads tokens into one reusable scratch string, looks the
//! token up, and copies it into the [`Arena`] only the first time it is
//! seen. The result is a [`Buffer`] of [`Word`]s ranked by descending
//! count.

use std::error::Error;
use std::fmt;

use cdata_arena::{Arena, ArenaError};
use cdata_collections::{Buffer, HashTable, StorageError};
use cdata_test_utils::{compare_words, compare_words_by_count, djb2, tokens, word_hash, Word};

/// How the distinct words are found and stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Unsorted buffer, sequential search.
    Sequential,
    /// Buffer kept sorted by word, binary search.
    Sorted,
    /// Open-addressing hash table keyed by word.
    Hash,
}

impl Strategy {
    /// Every strategy, in display order.
    pub const ALL: [Self; 3] = [Self::Sequential, Self::Sorted, Self::Hash];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sequential => "dynamic array",
            Self::Sorted => "sorted dynamic array",
            Self::Hash => "hash table",
        }
    }

    /// Command-line flag letter selecting this strategy.
    pub fn flag(self) -> char {
        match self {
            Self::Sequential => 'd',
            Self::Sorted => 's',
            Self::Hash => 't',
        }
    }

    /// One-line description for usage text.
    pub fn help(self) -> &'static str {
        match self {
            Self::Sequential => "Uses dynamic array with sequential search algorithm",
            Self::Sorted => "Uses sorted dynamic array algorithm",
            Self::Hash => "Uses hash table algorithm",
        }
    }

    /// The strategy selected by `flag`, if any.
    pub fn from_flag(flag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.flag() == flag)
    }
}

/// Errors from counting: a container or the arena could not grow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CountError {
    /// A buffer or hash table failed to grow.
    Storage(StorageError),
    /// The arena could not store a word.
    Arena(ArenaError),
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "word storage failed: {e}"),
            Self::Arena(e) => write!(f, "word copy failed: {e}"),
        }
    }
}

impl Error for CountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Arena(e) => Some(e),
        }
    }
}

impl From<StorageError> for CountError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ArenaError> for CountError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

/// Totals and ranked words for one text.
#[derive(Debug)]
pub struct WordCount<'a> {
    /// Lines in the text.
    pub lines: usize,
    /// Characters in the text.
    pub chars: usize,
    /// Words in the text, repeats included.
    pub words: usize,
    /// Distinct words by descending count, ties by word.
    pub ranked: Buffer<Word<'a>>,
}

impl WordCount<'_> {
    /// Number of distinct words.
    pub fn unique(&self) -> usize {
        self.ranked.len()
    }

    /// The `n` most frequent words (fewer if there are fewer distinct words).
    pub fn top(&self, n: usize) -> &[Word<'_>] {
        &self.ranked.as_slice()[..n.min(self.ranked.len())]
    }
}

/// Call `visit` with each word of `text`, lowercased, in one reused buffer.
///
/// Words are split as by [`cdata_test_utils::tokens`].
pub fn for_each_word<F>(text: &str, mut visit: F) -> Result<(), CountError>
where
    F: FnMut(&str) -> Result<(), CountError>,
{
    let mut scratch = String::new();
    for piece in tokens(text) {
        scratch.clear();
        scratch.extend(piece.chars().flat_map(char::to_lowercase));
        visit(&scratch)?;
    }
    Ok(())
}

/// Count the words of `text` with `strategy`, copying distinct words into
/// `arena`.
pub fn count_words<'a>(
    strategy: Strategy,
    arena: &'a Arena,
    text: &str,
) -> Result<WordCount<'a>, CountError> {
    let mut words = 0;
    let mut ranked = match strategy {
        Strategy::Sequential => {
            let mut counted: Buffer<Word<'a>> = Buffer::new()?;
            for_each_word(text, |token| {
                words += 1;
                match counted.sequential_search(token, |key: &str, w| key.cmp(w.word)) {
                    Some(index) => counted[index].count += 1,
                    None => counted.push(Word::new(arena.strdup(token)?, 1))?,
                }
                Ok(())
            })?;
            counted
        }
        Strategy::Sorted => {
            let mut counted: Buffer<Word<'a>> = Buffer::new()?;
            for_each_word(text, |token| {
                words += 1;
                match counted.binary_search(token, |key: &str, w| key.cmp(w.word)) {
                    Ok(index) => counted[index].count += 1,
                    Err(position) => {
                        counted.insert_at(position, Word::new(arena.strdup(token)?, 1))?
                    }
                }
                Ok(())
            })?;
            counted
        }
        Strategy::Hash => {
            let mut table = HashTable::new(word_hash, compare_words)?;
            for_each_word(text, |token| {
                words += 1;
                match table.find_mut(djb2(token), |w| w.word == token) {
                    Some(existing) => existing.count += 1,
                    None => {
                        let _ = table.insert(Word::new(arena.strdup(token)?, 1))?;
                    }
                }
                Ok(())
            })?;
            table.into_buffer()?
        }
    };
    ranked.sort_by(|a, b| compare_words_by_count(a, b).then_with(|| compare_words(a, b)));
    tracing::debug!(
        strategy = strategy.name(),
        words,
        unique = ranked.len(),
        "words counted"
    );
    Ok(WordCount {
        lines: text.lines().count(),
        chars: text.chars().count(),
        words,
        ranked,
    })
}
