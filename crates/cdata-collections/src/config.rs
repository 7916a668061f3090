//! Container configuration parameters.

use crate::error::ConfigError;

/// Configuration for a [`Buffer`](crate::Buffer).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Number of slots reserved up front.
    ///
    /// Default: 512.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity when a push would overflow it.
    ///
    /// Default: 2. Must be at least 2.
    pub growth_factor: usize,

    /// Hard upper bound on capacity, in elements.
    ///
    /// Default: `None` (bounded only by the allocator). Growth past the
    /// limit fails with [`StorageError::CapacityExceeded`](crate::StorageError::CapacityExceeded).
    pub max_capacity: Option<usize>,
}

impl BufferConfig {
    /// Default initial capacity in elements.
    pub const DEFAULT_CAPACITY: usize = 512;

    /// Default growth factor.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Create a config with the given initial capacity and default growth.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            max_capacity: None,
        }
    }

    /// Set the growth factor.
    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Set the capacity limit.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Check the invariants the buffer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_growth(self.growth_factor)?;
        validate_limit(self.initial_capacity, self.max_capacity)
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Maximum ratio of occupied slots to capacity, as an exact fraction.
///
/// Kept as integers so the resize check is exact:
/// `(len + 1) * denominator > numerator * capacity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadFactor {
    /// Numerator of the ratio.
    pub numerator: usize,
    /// Denominator of the ratio.
    pub denominator: usize,
}

impl LoadFactor {
    /// One half.
    pub const HALF: Self = Self {
        numerator: 1,
        denominator: 2,
    };

    /// Create a load factor of `numerator / denominator`.
    pub fn new(numerator: usize, denominator: usize) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Whether holding `len` entries in `capacity` slots stays within the ratio.
    pub fn admits(&self, len: usize, capacity: usize) -> bool {
        match (
            len.checked_mul(self.denominator),
            capacity.checked_mul(self.numerator),
        ) {
            (Some(used), Some(allowed)) => used <= allowed,
            // A capacity this large is never the limiting side.
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// The ratio as a float, for reporting.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.numerator == 0 || self.denominator == 0 || self.numerator >= self.denominator {
            return Err(ConfigError::InvalidLoadFactor {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        Self::HALF
    }
}

/// Probe sequence used by a [`HashTable`](crate::HashTable) on collision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Probing {
    /// `index = (index + 1) mod capacity`.
    #[default]
    Linear,
    /// `index = (start + i(i+1)/2) mod capacity`.
    ///
    /// Triangular offsets visit every slot of a power-of-two table exactly
    /// once in the first `capacity` probes.
    Quadratic,
}

/// Configuration for a [`HashTable`](crate::HashTable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Requested slot count. Rounded up to a power of two (minimum 1).
    ///
    /// Default: 512.
    pub initial_capacity: usize,

    /// Capacity multiplier on resize (result rounded up to a power of two).
    ///
    /// Default: 2. Must be at least 2.
    pub growth_factor: usize,

    /// Load factor that must hold after every insert.
    ///
    /// Default: 1/2.
    pub load_factor: LoadFactor,

    /// Collision resolution scheme.
    pub probing: Probing,

    /// Hard upper bound on slot count.
    pub max_capacity: Option<usize>,
}

impl TableConfig {
    /// Default initial capacity in slots.
    pub const DEFAULT_CAPACITY: usize = 512;

    /// Default growth factor.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Create a config for the given initial capacity with defaults elsewhere.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            load_factor: LoadFactor::HALF,
            probing: Probing::Linear,
            max_capacity: None,
        }
    }

    /// Set the growth factor.
    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Set the load factor.
    pub fn with_load_factor(mut self, load_factor: LoadFactor) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Set the probing scheme.
    pub fn with_probing(mut self, probing: Probing) -> Self {
        self.probing = probing;
        self
    }

    /// Set the capacity limit.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// The capacity a new table actually starts with, or `None` if the
    /// next power of two overflows `usize`.
    pub fn rounded_capacity(&self) -> Option<usize> {
        self.initial_capacity.checked_next_power_of_two()
    }

    /// Check the invariants the table relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_growth(self.growth_factor)?;
        self.load_factor.validate()?;
        let initial = self.rounded_capacity().unwrap_or(usize::MAX);
        validate_limit(initial, self.max_capacity)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

fn validate_growth(factor: usize) -> Result<(), ConfigError> {
    if factor < 2 {
        return Err(ConfigError::GrowthFactorTooSmall { factor });
    }
    Ok(())
}

fn validate_limit(initial: usize, max_capacity: Option<usize>) -> Result<(), ConfigError> {
    match max_capacity {
        Some(0) => Err(ConfigError::ZeroMaxCapacity),
        Some(limit) if initial > limit => Err(ConfigError::InitialAboveMax { initial, limit }),
        _ => Ok(()),
    }
}
