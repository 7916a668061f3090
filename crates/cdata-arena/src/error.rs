//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The system allocator refused a new region, or the request size
    /// overflowed when rounded up to the arena's alignment.
    AllocationFailed {
        /// Number of bytes that could not be obtained.
        bytes: usize,
    },
    /// The configured region limit is reached and the request does not fit
    /// in any remaining region.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Number of regions the arena already holds.
        regions: usize,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    InvalidConfig {
        /// What was wrong.
        reason: &'static str,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { bytes } => {
                write!(f, "arena allocation failed: could not obtain {bytes} bytes")
            }
            Self::CapacityExceeded { requested, regions } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes with all {regions} regions in use"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
