//! Behavioral scenarios shared by both table strategies.
//!
//! Every scenario runs against a chaining table and a linear-probing table
//! through the common `HashTable` interface.

use htable::{
    ChainingConfig, ChainingTable, HashTable, LinearProbingTable, ProbingConfig, Strategy,
    StrategyTable, TableError,
};

fn both<V>(capacity: usize) -> [StrategyTable<V>; 2] {
    [
        StrategyTable::new(Strategy::Chaining, capacity),
        StrategyTable::new(Strategy::LinearProbing, capacity),
    ]
}

/// The walk-through: insert three keys, update one, remove one, look up a
/// key that was never inserted.
#[test]
fn test_basic_walkthrough() {
    for mut table in both::<String>(10) {
        table.insert("name", "John".to_string()).unwrap();
        table.insert("age", "25".to_string()).unwrap();
        table.insert("city", "New York".to_string()).unwrap();

        assert_eq!(table.retrieve("name").as_deref(), Some("John"));
        assert_eq!(table.retrieve("age").as_deref(), Some("25"));
        assert_eq!(table.retrieve("city").as_deref(), Some("New York"));

        table.insert("name", "Jane".to_string()).unwrap();
        assert_eq!(table.retrieve("name").as_deref(), Some("Jane"));

        assert!(table.remove("age"));
        assert_eq!(table.retrieve("age"), None);
        assert_eq!(table.retrieve("country"), None);
        assert_eq!(table.len(), 2);
        assert!(table.is_consistent(), "{}", table.strategy());
    }
}

/// insert("age", 30), insert("age", 31) -> retrieve("age") == 31
#[test]
fn test_update_overwrites() {
    for mut table in both(10) {
        table.insert("age", 30).unwrap();
        table.insert("age", 31).unwrap();
        assert_eq!(table.retrieve("age"), Some(31));
        assert_eq!(table.len(), 1);
    }
}

/// insert("a", 1), insert("b", 2), remove("a") -> "a" absent, "b" == 2
#[test]
fn test_remove_keeps_other_keys() {
    for mut table in both(10) {
        table.insert("a", 1).unwrap();
        table.insert("b", 2).unwrap();
        assert!(table.remove("a"));
        assert_eq!(table.retrieve("a"), None);
        assert_eq!(table.retrieve("b"), Some(2));
    }
}

/// Ten integer keys 0..9 in a capacity-10 linear-probing table.
#[test]
fn test_ten_keys_in_ten_slots() {
    // Default policy grows before the table fills up.
    let mut growing = LinearProbingTable::new(10);
    for i in 0..10 {
        growing.insert(i, i * 100).unwrap();
    }
    assert!(growing.capacity() > 10);
    for i in 0..10 {
        assert_eq!(growing.retrieve(i), Some(i * 100));
    }

    // A fixed table reports full on the eleventh key.
    let mut fixed =
        LinearProbingTable::with_config(ProbingConfig::new().with_initial_capacity(10).fixed());
    for i in 0..10 {
        fixed.insert(i, i * 100).unwrap();
    }
    assert!(fixed.is_full());
    for i in 0..10 {
        assert_eq!(fixed.slot_of(i), Some(i as usize));
        assert_eq!(fixed.retrieve(i), Some(i * 100));
    }
    assert_eq!(
        fixed.insert(99, 0),
        Err(TableError::CapacityExhausted { capacity: 10 })
    );
}

/// remove("missing") on an empty table returns false.
#[test]
fn test_remove_on_empty_table() {
    for mut table in both::<i32>(10) {
        assert!(!table.remove("missing"));
        assert!(table.is_empty());
    }
}

#[test]
fn test_remove_twice_is_idempotent() {
    for mut table in both(10) {
        table.insert(5, "five").unwrap();
        assert!(table.remove(5));
        assert!(!table.remove(5));
    }
}

#[test]
fn test_anagram_collisions_resolved() {
    let words = ["listen", "silent", "enlist", "tinsel", "inlets"];
    for mut table in both(10) {
        for (i, word) in words.iter().enumerate() {
            table.insert(*word, i).unwrap();
        }
        assert!(table.stats().max_probe_length >= words.len());
        for (i, word) in words.iter().enumerate() {
            assert_eq!(table.retrieve(*word), Some(i));
        }

        assert!(table.remove("enlist"));
        assert_eq!(table.retrieve("enlist"), None);
        assert_eq!(table.retrieve("inlets"), Some(4));
        assert!(table.is_consistent());
    }
}

#[test]
fn test_negative_and_positive_integers_collide_but_stay_distinct() {
    for mut table in both(10) {
        table.insert(7, "plus").unwrap();
        table.insert(-7, "minus").unwrap();
        assert_eq!(table.retrieve(7), Some("plus"));
        assert_eq!(table.retrieve(-7), Some("minus"));
        assert!(table.remove(7));
        assert_eq!(table.retrieve(-7), Some("minus"));
    }
}

#[test]
fn test_bulk_insert_retrieve_remove() {
    for mut table in both(4) {
        for i in 0..1_000 {
            table.insert(format!("key-{}", i), i).unwrap();
        }
        assert_eq!(table.len(), 1_000);
        assert!(table.stats().resizes > 0);

        for i in (0..1_000).filter(|i| i % 2 == 0) {
            assert!(table.remove(&format!("key-{}", i)));
        }
        assert_eq!(table.len(), 500);

        for i in 0..1_000 {
            let expected = if i % 2 == 0 { None } else { Some(i) };
            assert_eq!(table.retrieve(&format!("key-{}", i)), expected);
        }
        assert!(table.is_consistent());
    }
}

#[test]
fn test_chaining_never_exhausts() {
    let mut table =
        ChainingTable::with_config(ChainingConfig::new().with_initial_capacity(1).fixed());
    for i in 0..200 {
        table.insert(i, i).unwrap();
    }
    assert_eq!(table.capacity(), 1);
    assert_eq!(table.longest_chain(), 200);
}

#[test]
fn test_values_are_opaque() {
    #[derive(Debug, Clone, PartialEq)]
    struct Payload {
        bytes: Vec<u8>,
    }

    for mut table in both(10) {
        table.insert("blob", Payload { bytes: vec![1, 2, 3] }).unwrap();
        assert_eq!(table.get("blob").map(|p| p.bytes.len()), Some(3));
    }
}
