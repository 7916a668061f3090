//! Search outcomes shared by buffer lookups.
//!
//! [`Buffer::binary_search`](crate::Buffer::binary_search) follows the
//! standard library: `Ok(index)` when the key is present, `Err(position)`
//! with the position that keeps the buffer sorted otherwise. Callers that
//! need the single signed value used by C-style search APIs (where a miss
//! is `-(position) - 1`) can convert with [`encode_missing`] and
//! [`decode_missing`].

/// Outcome of [`Buffer::insert_sorted`](crate::Buffer::insert_sorted).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum SortedInsert {
    /// The value was absent and now lives at this index.
    Inserted(usize),
    /// An equal value already lives at this index; nothing changed.
    AlreadyPresent(usize),
}

impl SortedInsert {
    /// Index of the new or existing element.
    pub fn index(self) -> usize {
        match self {
            Self::Inserted(index) | Self::AlreadyPresent(index) => index,
        }
    }

    /// Whether the buffer changed.
    pub fn inserted(self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Encode a binary-search result as one signed value.
///
/// Hits map to their non-negative index; misses to `-(position) - 1`.
/// Returns `None` if the index does not fit in `isize`.
pub fn encode_missing(result: Result<usize, usize>) -> Option<isize> {
    match result {
        Ok(index) => isize::try_from(index).ok(),
        Err(position) => isize::try_from(position).ok().map(|p| -p - 1),
    }
}

/// Inverse of [`encode_missing`].
pub fn decode_missing(encoded: isize) -> Result<usize, usize> {
    if encoded >= 0 {
        Ok(encoded.unsigned_abs())
    } else {
        Err((-(encoded + 1)).unsigned_abs())
    }
}
