//! Probe sequences over power-of-two tables.

use crate::config::Probing;

/// Yields the slot indices visited for one lookup, starting at the home
/// slot, for at most `capacity` steps.
///
/// `capacity` must be a power of two so that `& (capacity - 1)` is the
/// modulus and the quadratic (triangular) sequence is a permutation.
#[derive(Clone, Debug)]
pub(crate) struct ProbeSeq {
    mask: usize,
    index: usize,
    step: usize,
    remaining: usize,
    probing: Probing,
}

impl ProbeSeq {
    pub(crate) fn new(hash: u64, capacity: usize, probing: Probing) -> Self {
        debug_assert!(capacity.is_power_of_two(), "capacity {capacity} not a power of two");
        let mask = capacity - 1;
        Self {
            mask,
            index: home_slot(hash, mask),
            step: 0,
            remaining: capacity,
            probing,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.step += 1;
        let stride = match self.probing {
            Probing::Linear => 1,
            // start + 1, start + 3, start + 6, ...: offsets are i(i+1)/2.
            Probing::Quadratic => self.step,
        };
        self.index = (self.index.wrapping_add(stride)) & self.mask;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// `hash mod capacity` for a power-of-two capacity.
pub(crate) fn home_slot(hash: u64, mask: usize) -> usize {
    // Truncating to usize first keeps the low bits, which is all the mask reads.
    (hash as usize) & mask
}
