//! # htable
//!
//! In-memory key-value tables with two interchangeable collision-resolution
//! strategies behind one interface:
//!
//! - **Separate chaining** ([`ChainingTable`]): each bucket holds an ordered
//!   list of entries; colliding keys share a bucket.
//! - **Linear probing** ([`LinearProbingTable`]): a flat slot array; a
//!   colliding key is stored in the next free slot.
//!
//! Both implement [`HashTable`], and [`StrategyTable`] selects one of them at
//! runtime.
//!
//! ## Features
//!
//! - **String and integer keys**: see [`Key`]; lookups borrow through
//!   [`KeyRef`] and never allocate
//! - **Update semantics**: inserting an existing key overwrites its value
//! - **Configurable resizing**: grow-and-rehash at a load factor, or a fixed
//!   capacity that reports [`TableError::CapacityExhausted`]
//! - **Tombstone-free removal** for linear probing
//! - **Simple, transparent hashing**: see [`hash`] for the exact function
//!
//! ## Quick Start
//!
//! ```rust
//! use htable::{ChainingTable, HashTable, LinearProbingTable};
//!
//! let mut chaining = ChainingTable::new(10);
//! chaining.insert("name", "John").unwrap();
//! chaining.insert("name", "Jane").unwrap();
//! assert_eq!(chaining.retrieve("name"), Some("Jane"));
//!
//! let mut probing = LinearProbingTable::new(10);
//! probing.insert(42, "answer").unwrap();
//! assert!(probing.remove(42));
//! assert_eq!(probing.retrieve(42), None);
//! ```
//!
//! ### Configuration
//!
//! ```rust
//! use htable::{HashTable, LinearProbingTable, ProbingConfig, TableError};
//!
//! let config = ProbingConfig::new().with_initial_capacity(10).fixed();
//! let mut table = LinearProbingTable::with_config(config);
//!
//! for i in 0..10 {
//!     table.insert(i, i).unwrap();
//! }
//! assert_eq!(
//!     table.insert(10, 10),
//!     Err(TableError::CapacityExhausted { capacity: 10 })
//! );
//! ```
//!
//! ### Choosing a strategy at runtime
//!
//! ```rust
//! use htable::{HashTable, Strategy, StrategyTable, TableConfig};
//!
//! let config = TableConfig::from_json(r#"{"probing": {"initial_capacity": 64}}"#).unwrap();
//! let mut table = StrategyTable::with_config(Strategy::LinearProbing, &config);
//! table.insert("city", "New York").unwrap();
//! assert_eq!(table.capacity(), 64);
//! ```
//!
//! ### Keys from untyped input
//!
//! ```rust
//! use htable::{Key, TableError};
//! use serde_json::json;
//!
//! assert_eq!(Key::try_from(&json!("age")).unwrap(), Key::from("age"));
//! assert!(matches!(
//!     Key::try_from(&json!(1.5)),
//!     Err(TableError::InvalidKeyType { .. })
//! ));
//! ```
//!
//! ## Thread Safety
//!
//! The tables do no internal locking. They are `Send + Sync` whenever the
//! value type is, so a caller that needs shared mutable access wraps the
//! whole table in a lock of its choice.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod config;
pub mod error;
pub mod hash;
pub mod key;
pub mod table;

// Re-exports for convenience
pub use config::{
    ChainingConfig, ProbingConfig, ResizePolicy, TableConfig, DEFAULT_CHAINING_LOAD_FACTOR,
    DEFAULT_INITIAL_CAPACITY, DEFAULT_PROBING_LOAD_FACTOR,
};
pub use error::{Result, TableError};
pub use hash::{hash_key, index_for};
pub use key::{Key, KeyRef};
pub use table::{ChainingTable, HashTable, LinearProbingTable, Strategy, StrategyTable, TableStats};
