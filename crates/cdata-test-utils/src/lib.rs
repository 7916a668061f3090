//! Test fixtures and word-counting helpers for cdata development.
//!
//! Provides the [`Word`] record used by the word-count scenarios, the
//! [`djb2`] string hash, the two comparators the counters sort with, and a
//! [`words`] tokenizer over raw text.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cmp::Ordering;

pub mod fixtures;

/// A counted word. The text is borrowed, typically from an arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Word<'a> {
    pub word: &'a str,
    pub count: usize,
}

impl<'a> Word<'a> {
    pub fn new(word: &'a str, count: usize) -> Self {
        Self { word, count }
    }

    /// A probe key: the text with a zero count.
    pub fn key(word: &'a str) -> Self {
        Self { word, count: 0 }
    }
}

/// Bernstein's djb2: `hash = hash * 33 + byte`, seeded with 5381.
pub fn djb2(text: &str) -> u64 {
    text.bytes().fold(5381u64, |hash, byte| {
        hash.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

/// [`djb2`] of the word's text.
pub fn word_hash(word: &Word<'_>) -> u64 {
    djb2(word.word)
}

/// Lexicographic order on the word text.
pub fn compare_words(a: &Word<'_>, b: &Word<'_>) -> Ordering {
    a.word.cmp(b.word)
}

/// Descending order on the count.
pub fn compare_words_by_count(a: &Word<'_>, b: &Word<'_>) -> Ordering {
    b.count.cmp(&a.count)
}

/// The non-empty runs of `text` between whitespace and ASCII punctuation,
/// case untouched.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|token| !token.is_empty())
}

/// [`tokens`] of `text`, each lowercased.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    tokens(text).map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 5381 * 33 + 97);
        assert_ne!(djb2("ab"), djb2("ba"));
    }

    #[test]
    fn by_count_sorts_descending() {
        let mut counted = vec![Word::new("a", 1), Word::new("b", 3), Word::new("c", 2)];
        counted.sort_by(compare_words_by_count);
        let order: Vec<&str> = counted.iter().map(|w| w.word).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn compare_ignores_count() {
        assert_eq!(
            compare_words(&Word::new("fox", 9), &Word::key("fox")),
            Ordering::Equal
        );
    }

    #[test]
    fn tokenizer_splits_and_lowercases() {
        let found: Vec<String> = words("The quick, brown fox.\n\"Jumps!\"").collect();
        assert_eq!(found, vec!["the", "quick", "brown", "fox", "jumps"]);
    }

    #[test]
    fn tokens_keep_case_and_skip_empty_runs() {
        let found: Vec<&str> = tokens("  Hello,,WORLD -- it's ").collect();
        assert_eq!(found, vec!["Hello", "WORLD", "it", "s"]);
    }
}
