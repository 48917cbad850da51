//! Configuration types for the htable library.
//!
//! This module provides configuration structs for the initial size and the
//! resize policy of each table strategy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Default number of buckets or slots for a new table.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Default average chain length that triggers a chaining table to grow.
pub const DEFAULT_CHAINING_LOAD_FACTOR: f64 = 2.0;

/// Default occupancy ratio that triggers a linear-probing table to grow.
pub const DEFAULT_PROBING_LOAD_FACTOR: f64 = 0.7;

/// What a table does when it fills up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Never resize automatically.
    ///
    /// Chaining tables keep growing their chains. Linear-probing tables
    /// reject new keys with `CapacityExhausted` once every slot is taken.
    Fixed,

    /// Double the capacity and rehash every entry before the load factor
    /// would exceed `max_load_factor`.
    Grow {
        /// Load factor (`len / capacity`) above which the table grows
        max_load_factor: f64,
    },
}

impl ResizePolicy {
    /// Returns true if a table with `len` entries and `capacity` cells must
    /// grow before accepting one more entry.
    pub fn should_grow(&self, len: usize, capacity: usize) -> bool {
        match self {
            ResizePolicy::Fixed => false,
            ResizePolicy::Grow { max_load_factor } => {
                (len + 1) as f64 / capacity as f64 > *max_load_factor
            }
        }
    }

    /// Check if this policy resizes automatically.
    pub fn is_growing(&self) -> bool {
        matches!(self, ResizePolicy::Grow { .. })
    }
}

/// Configuration for a separate-chaining table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainingConfig {
    /// Number of buckets allocated at construction.
    ///
    /// Default: 10
    pub initial_capacity: usize,

    /// Resize policy. The load factor is the average chain length.
    ///
    /// Default: grow above 2.0 entries per bucket
    pub resize: ResizePolicy,
}

impl Default for ChainingConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            resize: ResizePolicy::Grow {
                max_load_factor: DEFAULT_CHAINING_LOAD_FACTOR,
            },
        }
    }
}

impl ChainingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial number of buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Initial capacity must be > 0");
        self.initial_capacity = capacity;
        self
    }

    /// Grow when the average chain length would exceed `max_load_factor`.
    ///
    /// # Panics
    ///
    /// Panics if `max_load_factor` is not a positive number.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        assert!(max_load_factor > 0.0, "Chaining load factor must be > 0.0");
        self.resize = ResizePolicy::Grow { max_load_factor };
        self
    }

    /// Never resize; chains grow without bound.
    pub fn fixed(mut self) -> Self {
        self.resize = ResizePolicy::Fixed;
        self
    }

    /// Check a configuration that did not go through the builder.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidConfig(
                "chaining initial_capacity must be > 0".to_string(),
            ));
        }
        if let ResizePolicy::Grow { max_load_factor } = self.resize {
            if max_load_factor.is_nan() || max_load_factor <= 0.0 {
                return Err(TableError::InvalidConfig(format!(
                    "chaining max_load_factor must be > 0.0, got {}",
                    max_load_factor
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for a linear-probing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbingConfig {
    /// Number of slots allocated at construction.
    ///
    /// Default: 10
    pub initial_capacity: usize,

    /// Resize policy. The load factor is the fraction of occupied slots.
    ///
    /// Default: grow above 0.7
    pub resize: ResizePolicy,
}

impl Default for ProbingConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            resize: ResizePolicy::Grow {
                max_load_factor: DEFAULT_PROBING_LOAD_FACTOR,
            },
        }
    }
}

impl ProbingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial number of slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Initial capacity must be > 0");
        self.initial_capacity = capacity;
        self
    }

    /// Grow when occupancy would exceed `max_load_factor`.
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 < max_load_factor <= 1.0`.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        assert!(
            max_load_factor > 0.0 && max_load_factor <= 1.0,
            "Probing load factor must be in (0.0, 1.0]"
        );
        self.resize = ResizePolicy::Grow { max_load_factor };
        self
    }

    /// Keep the capacity fixed; inserting a new key into a full table fails.
    pub fn fixed(mut self) -> Self {
        self.resize = ResizePolicy::Fixed;
        self
    }

    /// Check a configuration that did not go through the builder.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidConfig(
                "probing initial_capacity must be > 0".to_string(),
            ));
        }
        if let ResizePolicy::Grow { max_load_factor } = self.resize {
            if max_load_factor.is_nan() || max_load_factor <= 0.0 || max_load_factor > 1.0 {
                return Err(TableError::InvalidConfig(format!(
                    "probing max_load_factor must be in (0.0, 1.0], got {}",
                    max_load_factor
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for both strategies, as loaded from a config file.
///
/// ```json
/// {
///   "chaining": { "initial_capacity": 64 },
///   "probing": { "resize": { "mode": "fixed" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Settings used when the chaining strategy is selected.
    pub chaining: ChainingConfig,
    /// Settings used when the linear-probing strategy is selected.
    pub probing: ProbingConfig,
}

impl TableConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chaining configuration.
    pub fn with_chaining(mut self, config: ChainingConfig) -> Self {
        self.chaining = config;
        self
    }

    /// Set the linear-probing configuration.
    pub fn with_probing(mut self, config: ProbingConfig) -> Self {
        self.probing = config;
        self
    }

    /// Set the initial capacity of both strategies.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.chaining = self.chaining.with_initial_capacity(capacity);
        self.probing = self.probing.with_initial_capacity(capacity);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check both strategy configurations.
    pub fn validate(&self) -> Result<()> {
        self.chaining.validate()?;
        self.probing.validate()
    }
}
