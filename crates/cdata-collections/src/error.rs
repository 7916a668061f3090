//! Storage and configuration error types.

use std::error::Error;
use std::fmt;

/// Errors from growing or populating container storage.
///
/// Every variant is reported *before* any element is moved, so a container
/// that returns one of these is exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The allocator refused to provide the requested slots.
    AllocationFailed {
        /// Capacity (in elements) that was being reserved.
        requested: usize,
    },
    /// The next capacity does not fit in `usize` or in the address space.
    CapacityOverflow,
    /// The request is larger than the configured `max_capacity`.
    CapacityExceeded {
        /// Capacity (in elements) that was being reserved.
        requested: usize,
        /// The configured limit.
        limit: usize,
    },
    /// An exhaustive probe found neither the key nor an empty slot.
    ///
    /// Unreachable while the load-factor invariant holds.
    TableFull {
        /// Capacity of the table that was probed.
        capacity: usize,
    },
    /// The container configuration was rejected at construction.
    InvalidConfig(ConfigError),
}

impl StorageError {
    /// Classify a failed `try_reserve` of `requested` slots of `T`.
    ///
    /// A layout larger than `isize::MAX` bytes is an overflow; anything else
    /// is the allocator saying no.
    pub(crate) fn reserve_failed<T>(requested: usize) -> Self {
        let fits = requested
            .checked_mul(std::mem::size_of::<T>())
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if fits {
            Self::AllocationFailed { requested }
        } else {
            Self::CapacityOverflow
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "allocation failed: could not reserve {requested} slots")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} slots, limit {limit} slots"
                )
            }
            Self::TableFull { capacity } => {
                write!(f, "hash table full: probed all {capacity} slots")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<ConfigError> for StorageError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

/// Reasons a [`BufferConfig`](crate::BufferConfig) or
/// [`TableConfig`](crate::TableConfig) is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Growth factor must be at least 2.
    GrowthFactorTooSmall {
        /// The rejected factor.
        factor: usize,
    },
    /// Load factor must satisfy `0 < numerator < denominator`.
    InvalidLoadFactor {
        /// Numerator of the rejected ratio.
        numerator: usize,
        /// Denominator of the rejected ratio.
        denominator: usize,
    },
    /// `max_capacity` was set to zero.
    ZeroMaxCapacity,
    /// `initial_capacity` is larger than `max_capacity`.
    InitialAboveMax {
        /// Requested initial capacity.
        initial: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthFactorTooSmall { factor } => {
                write!(f, "growth factor {factor} must be at least 2")
            }
            Self::InvalidLoadFactor {
                numerator,
                denominator,
            } => write!(
                f,
                "load factor {numerator}/{denominator} must be strictly between 0 and 1"
            ),
            Self::ZeroMaxCapacity => write!(f, "max_capacity must be non-zero"),
            Self::InitialAboveMax { initial, limit } => write!(
                f,
                "initial capacity {initial} is above max_capacity {limit}"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_the_source_of_invalid_config() {
        let err = StorageError::from(ConfigError::ZeroMaxCapacity);
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_capacity must be non-zero"
        );
    }

    #[test]
    fn capacity_exceeded_message() {
        let err = StorageError::CapacityExceeded {
            requested: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "capacity exceeded: requested 2048 slots, limit 1024 slots"
        );
    }

    #[test]
    fn overflowing_reserve_maps_to_capacity_overflow() {
        assert_eq!(
            StorageError::reserve_failed::<u64>(usize::MAX),
            StorageError::CapacityOverflow
        );
        assert_eq!(
            StorageError::reserve_failed::<u64>(16),
            StorageError::AllocationFailed { requested: 16 }
        );
    }
}
