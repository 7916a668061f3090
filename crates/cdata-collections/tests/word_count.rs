//! Integration test: counting words with each container strategy.
//!
//! The three strategies (sequential search, sorted insert, hash table) must
//! agree on every count, and the hash table's array conversion must hold
//! exactly the distinct words.

use cdata_collections::{Buffer, BufferConfig, HashTable, Insert, SortedInsert, TableConfig};
use cdata_test_utils::fixtures::{repeated_corpus, PANGRAM_PARAGRAPH, THE_QUICK_FOX, THE_QUICK_FOX_COUNTS};
use cdata_test_utils::{compare_words, compare_words_by_count, djb2, word_hash, words, Word};

fn tokens(text: &str) -> Vec<String> {
    words(text).collect()
}

fn count_sequential(tokens: &[String]) -> Buffer<Word<'_>> {
    let mut counted = Buffer::new().unwrap();
    for token in tokens {
        let key = Word::key(token);
        match counted.sequential_search(&key, compare_words) {
            Some(index) => counted[index].count += 1,
            None => counted.push(Word::new(token, 1)).unwrap(),
        }
    }
    counted
}

fn count_sorted(tokens: &[String]) -> Buffer<Word<'_>> {
    let mut counted = Buffer::new().unwrap();
    for token in tokens {
        match counted.insert_sorted(Word::new(token, 1), compare_words).unwrap() {
            SortedInsert::Inserted(_) => {}
            SortedInsert::AlreadyPresent(index) => counted[index].count += 1,
        }
    }
    counted
}

fn count_hashed(tokens: &[String]) -> Buffer<Word<'_>> {
    let mut table = HashTable::new(word_hash, compare_words).unwrap();
    for token in tokens {
        if let Insert::Present(existing) = table.insert(Word::new(token, 1)).unwrap() {
            existing.count += 1;
        }
    }
    table.to_array().unwrap()
}

/// Sort by descending count, ties by text, and flatten for comparison.
fn ranked(mut counted: Buffer<Word<'_>>) -> Vec<(String, usize)> {
    counted.sort_by(|a, b| compare_words_by_count(a, b).then_with(|| compare_words(a, b)));
    counted
        .iter()
        .map(|w| (w.word.to_string(), w.count))
        .collect()
}

#[test]
fn quick_fox_counts_agree_across_strategies() {
    let tokens = tokens(THE_QUICK_FOX);
    let expected: Vec<(String, usize)> = THE_QUICK_FOX_COUNTS
        .iter()
        .map(|(w, c)| (w.to_string(), *c))
        .collect();

    assert_eq!(ranked(count_sequential(&tokens)), expected);
    assert_eq!(ranked(count_sorted(&tokens)), expected);

    let hashed = count_hashed(&tokens);
    assert_eq!(hashed.len(), 3);
    assert_eq!(ranked(hashed), expected);
}

#[test]
fn sorted_strategy_keeps_buffer_sorted() {
    let tokens = tokens(PANGRAM_PARAGRAPH);
    let counted = count_sorted(&tokens);
    assert!(counted
        .as_slice()
        .windows(2)
        .all(|pair| pair[0].word < pair[1].word));
    let the = counted
        .binary_search(&Word::key("the"), compare_words)
        .unwrap();
    assert_eq!(counted[the].count, 5);
}

#[test]
fn large_vocabulary_forces_growth() {
    let all: Vec<String> = (0..600).map(|i| format!("w{i:03}")).collect();
    let vocabulary: Vec<&str> = all.iter().map(String::as_str).collect();
    let (text, expected) = repeated_corpus(&vocabulary[..40]);
    let tokens = tokens(&text);

    let ranked_sequential = ranked(count_sequential(&tokens));
    let ranked_hashed = ranked(count_hashed(&tokens));
    assert_eq!(ranked_sequential, ranked_hashed);
    assert_eq!(ranked_hashed.len(), expected.len());

    // 600 distinct words push both containers past their default 512.
    let sorted = count_sorted(&all);
    assert_eq!(sorted.len(), 600);
    assert_eq!(sorted.capacity(), 1024);
    let hashed = count_hashed(&all);
    assert_eq!(hashed.len(), 600);
}

#[test]
fn find_mut_counts_borrowed_tokens() {
    // Probe with a transient token, store only on a miss.
    let tokens = tokens(THE_QUICK_FOX);
    let mut table = HashTable::with_config(word_hash, compare_words, TableConfig::new(4)).unwrap();
    for token in &tokens {
        match table.find_mut(djb2(token), |w| w.word == token.as_str()) {
            Some(existing) => existing.count += 1,
            None => {
                let _ = table.insert(Word::new(token, 1)).unwrap();
            }
        }
    }
    assert_eq!(table.get(&Word::key("the")).map(|w| w.count), Some(3));
    assert_eq!(table.get(&Word::key("dog")), None);
}

#[test]
fn capped_buffer_reports_error_and_keeps_words() {
    let tokens = tokens("one two three");
    let mut counted = Buffer::with_config(BufferConfig::new(2).with_max_capacity(2)).unwrap();
    counted.push(Word::new(&tokens[0], 1)).unwrap();
    counted.push(Word::new(&tokens[1], 1)).unwrap();
    assert!(counted.push(Word::new(&tokens[2], 1)).is_err());
    let kept: Vec<&str> = counted.iter().map(|w| w.word).collect();
    assert_eq!(kept, vec!["one", "two"]);
}
