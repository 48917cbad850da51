//! Error types for the htable library.
//!
//! Lookups and removals never fail: a missing key is `None` from
//! `retrieve` and `false` from `remove`. The conditions below are the only
//! ones that surface as errors.

use thiserror::Error;

/// Main error type for the htable library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A fixed-capacity linear-probing table has no free slot left for a
    /// new key.
    ///
    /// The table is left exactly as it was before the insert.
    #[error("Hash table is full: all {capacity} slots are occupied")]
    CapacityExhausted {
        /// Number of slots in the table
        capacity: usize,
    },

    /// A dynamically-typed key was neither a string nor an integer.
    #[error("Invalid key type: expected string or integer, found {found}")]
    InvalidKeyType {
        /// Short description of the rejected value's type
        found: String,
    },

    /// An explicit resize asked for a capacity the table cannot use.
    #[error("Invalid capacity {requested}: table holds {len} entries")]
    InvalidCapacity {
        /// The capacity that was requested
        requested: usize,
        /// Number of live entries at the time of the request
        len: usize,
    },

    /// A configuration value is out of range.
    ///
    /// Builder methods panic on bad arguments; this variant is returned by
    /// `validate` for configurations that were deserialized from a file.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Type alias for Results using `TableError`.
pub type Result<T> = std::result::Result<T, TableError>;
