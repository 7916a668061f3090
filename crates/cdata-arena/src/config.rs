//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for the arena allocator.
///
/// Controls region sizing and the optional region limit. Validated at
/// construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Minimum size of each region in bytes.
    ///
    /// Default: 4096. A request larger than this gets a region of its own,
    /// sized to fit. Must be non-zero.
    pub region_capacity: usize,

    /// Maximum number of regions the arena may hold.
    ///
    /// Default: `None` (bounded only by the allocator). Reaching the limit
    /// turns the next region-creating allocation into
    /// [`ArenaError::CapacityExceeded`].
    pub max_regions: Option<usize>,
}

impl ArenaConfig {
    /// Default region capacity in bytes.
    pub const DEFAULT_REGION_CAPACITY: usize = 4096;

    /// Create a config with the given region capacity and no region limit.
    pub fn new(region_capacity: usize) -> Self {
        Self {
            region_capacity,
            max_regions: None,
        }
    }

    /// Set the region limit.
    pub fn with_max_regions(mut self, max_regions: usize) -> Self {
        self.max_regions = Some(max_regions);
        self
    }

    /// Check the invariants the arena relies on.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.region_capacity == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "region_capacity must be non-zero",
            });
        }
        if self.max_regions == Some(0) {
            return Err(ArenaError::InvalidConfig {
                reason: "max_regions must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REGION_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_4k() {
        let config = ArenaConfig::default();
        assert_eq!(config.region_capacity, 4096);
        assert_eq!(config.max_regions, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sizes_rejected() {
        assert!(matches!(
            ArenaConfig::new(0).validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
        assert!(ArenaConfig::new(64).with_max_regions(0).validate().is_err());
    }
}
