//! Fixed-length bitset used as the hash table's occupancy map.
//!
//! One bit per slot, packed into `usize` words. Tables of up to 128 slots
//! keep their words inline.

use smallvec::SmallVec;

use crate::error::StorageError;

const WORD_BITS: usize = usize::BITS as usize;

/// A fixed-length sequence of bits, all initially clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitset {
    words: SmallVec<[usize; 2]>,
    len: usize,
}

impl Bitset {
    /// Allocate `len` clear bits.
    pub fn with_len(len: usize) -> Result<Self, StorageError> {
        let word_count = Self::words_for(len);
        let mut words = SmallVec::new();
        words
            .try_reserve_exact(word_count)
            .map_err(|_| StorageError::reserve_failed::<usize>(word_count))?;
        words.resize(word_count, 0);
        Ok(Self { words, len })
    }

    /// Number of words needed for `len` bits: `ceil(len / usize::BITS)`.
    pub fn words_for(len: usize) -> usize {
        len.div_ceil(WORD_BITS)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bitset has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether bit `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn test(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word] & mask != 0
    }

    /// Set bit `index`.
    pub fn set(&mut self, index: usize) {
        let (word, mask) = self.locate(index);
        self.words[word] |= mask;
    }

    /// Clear bit `index`.
    pub fn clear(&mut self, index: usize) {
        let (word, mask) = self.locate(index);
        self.words[word] &= !mask;
    }

    /// Clear every bit.
    pub fn clear_all(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Index of the first set bit at or after `from`, if any.
    pub fn next_set(&self, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        let mut word_index = from / WORD_BITS;
        let mut word = self.words[word_index] & (usize::MAX << (from % WORD_BITS));
        loop {
            if word != 0 {
                let index = word_index * WORD_BITS + word.trailing_zeros() as usize;
                return (index < self.len).then_some(index);
            }
            word_index += 1;
            word = *self.words.get(word_index)?;
        }
    }

    fn locate(&self, index: usize) -> (usize, usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for bitset of {}",
            self.len
        );
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }
}
