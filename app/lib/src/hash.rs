//! The hash function shared by both table strategies.
//!
//! - String keys hash to the sum of their characters' Unicode scalar values.
//! - Integer keys hash to their absolute value.
//!
//! The function is deliberately simple and not collision resistant. Strings
//! that are anagrams of each other (`"listen"` / `"silent"`) always hash to
//! the same value, as do `n` and `-n`. That makes collisions easy to produce
//! on purpose, which is what the test suites and the benchmark driver rely
//! on to exercise chaining and probing.

use crate::key::KeyRef;

/// Hash a key to a non-negative integer.
pub fn hash_key<'k>(key: impl Into<KeyRef<'k>>) -> u64 {
    match key.into() {
        KeyRef::Str(s) => s
            .chars()
            .fold(0u64, |acc, c| acc.wrapping_add(u64::from(u32::from(c)))),
        KeyRef::Int(i) => i.unsigned_abs(),
    }
}

/// Map a key to a bucket or slot index in a table of `capacity` cells.
///
/// `capacity` must be non-zero.
pub fn index_for<'k>(key: impl Into<KeyRef<'k>>, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "capacity must be non-zero");
    (hash_key(key) % capacity as u64) as usize
}
