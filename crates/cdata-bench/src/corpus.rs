//! Deterministic synthetic text for benchmarks.
//!
//! Word frequencies are skewed toward the front of the vocabulary (the
//! minimum of two uniform draws), so a corpus has a few very common words
//! and a long tail, like natural text.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "ne", "ru", "sa", "ti", "vo", "ze", "qua", "bri", "dol",
];

/// Shape of a generated corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorpusSpec {
    /// RNG seed. Equal specs produce identical text.
    pub seed: u64,
    /// Number of distinct words to draw from.
    pub vocabulary: usize,
    /// Number of words in the text.
    pub tokens: usize,
    /// Words per line.
    pub line_width: usize,
}

impl CorpusSpec {
    /// A corpus of `tokens` words over `vocabulary` distinct words.
    pub fn new(seed: u64, vocabulary: usize, tokens: usize) -> Self {
        Self {
            seed,
            vocabulary,
            tokens,
            line_width: 12,
        }
    }
}

/// The `index`-th vocabulary word: syllables spelled out in base
/// `SYLLABLES.len()`, so distinct indices give distinct words.
pub fn vocabulary_word(mut index: usize) -> String {
    let base = SYLLABLES.len();
    let mut word = String::new();
    loop {
        word.push_str(SYLLABLES[index % base]);
        index /= base;
        if index == 0 {
            break;
        }
    }
    word
}

/// Generate the text described by `spec`.
pub fn generate(spec: &CorpusSpec) -> String {
    let vocabulary: Vec<String> = (0..spec.vocabulary.max(1)).map(vocabulary_word).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed);
    let mut text = String::new();
    for token in 0..spec.tokens {
        let a = rng.random_range(0..vocabulary.len());
        let b = rng.random_range(0..vocabulary.len());
        let word = &vocabulary[a.min(b)];
        // Capitals and punctuation exercise the tokenizer.
        match rng.random_range(0..20u8) {
            0 => {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    text.extend(first.to_uppercase());
                    text.push_str(chars.as_str());
                }
            }
            1 => {
                text.push_str(word);
                text.push(',');
            }
            _ => text.push_str(word),
        }
        let end_of_line = spec.line_width > 0 && (token + 1) % spec.line_width == 0;
        text.push(if end_of_line { '\n' } else { ' ' });
    }
    text
}
