//! Reusable text fixtures for word-count scenarios.
//!
//! - [`THE_QUICK_FOX`]: five tokens, three distinct.
//! - [`PANGRAM_PARAGRAPH`]: mixed case and punctuation over several lines.
//! - [`repeated_corpus`]: a larger text with known per-word counts.

/// `the` three times, `quick` and `fox` once each.
pub const THE_QUICK_FOX: &str = "the quick the fox the";

/// Counts for [`THE_QUICK_FOX`], sorted by descending count then text.
pub const THE_QUICK_FOX_COUNTS: &[(&str, usize)] = &[("the", 3), ("fox", 1), ("quick", 1)];

/// Several lines with punctuation and capitals.
pub const PANGRAM_PARAGRAPH: &str = "\
The quick brown fox jumps over the lazy dog.
THE DOG sleeps; the fox doesn't!
\"Quick,\" said the dog -- too late.
";

/// A corpus where word `i` of `vocabulary` appears `i + 1` times,
/// interleaved so equal words are never adjacent.
///
/// Returns the text and the expected `(word, count)` pairs.
pub fn repeated_corpus<'a>(vocabulary: &[&'a str]) -> (String, Vec<(&'a str, usize)>) {
    let rounds = vocabulary.len();
    let mut text = String::new();
    for round in 0..rounds {
        for (index, word) in vocabulary.iter().enumerate() {
            if index >= round {
                text.push_str(word);
                text.push(' ');
            }
        }
    }
    let expected = vocabulary
        .iter()
        .enumerate()
        .map(|(index, word)| (*word, index + 1))
        .collect();
    (text, expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words;

    #[test]
    fn quick_fox_tokenizes_to_five() {
        assert_eq!(words(THE_QUICK_FOX).count(), 5);
    }

    #[test]
    fn repeated_corpus_counts() {
        let (text, expected) = repeated_corpus(&["a", "b", "c"]);
        assert_eq!(text, "a b c b c c ");
        assert_eq!(expected, vec![("a", 1), ("b", 2), ("c", 3)]);
    }
}
