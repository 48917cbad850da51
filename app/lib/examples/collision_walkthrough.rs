//! Example showing how each strategy handles colliding keys.
//!
//! Inserts a handful of anagrams (which share a hash) into both tables,
//! prints where they end up, then removes one and shows the linear-probing
//! run being repaired.
//!
//! Run with: cargo run --example collision_walkthrough

use htable::{index_for, ChainingTable, HashTable, LinearProbingTable, ProbingConfig, TableError};

fn main() -> Result<(), TableError> {
    println!("=== Collision Walkthrough ===\n");

    let words = ["listen", "silent", "enlist", "tinsel"];

    // Example 1: chaining keeps colliding keys in one bucket
    println!("1. Separate chaining (capacity 10)");
    let mut chaining = ChainingTable::new(10);
    for (i, word) in words.iter().enumerate() {
        chaining.insert(*word, i)?;
    }
    println!("   Home bucket of every word: {}", index_for(words[0], 10));
    println!("   Longest chain: {}", chaining.longest_chain());
    println!("   Stats: {:?}\n", chaining.stats());

    // Example 2: linear probing spreads them over consecutive slots
    println!("2. Linear probing (capacity 10, fixed)");
    let mut probing =
        LinearProbingTable::with_config(ProbingConfig::new().with_initial_capacity(10).fixed());
    for (i, word) in words.iter().enumerate() {
        probing.insert(*word, i)?;
    }
    for word in &words {
        println!("   {:<8} -> slot {:?}", word, probing.slot_of(*word));
    }

    // Example 3: removal without tombstones
    println!("\n3. Removing \"silent\"");
    probing.remove("silent");
    for word in &words {
        println!(
            "   {:<8} -> slot {:?}, value {:?}",
            word,
            probing.slot_of(*word),
            probing.retrieve(*word)
        );
    }

    // Example 4: a fixed table reports when it is full
    println!("\n4. Filling a fixed table of 3 slots");
    let mut small =
        LinearProbingTable::with_config(ProbingConfig::new().with_initial_capacity(3).fixed());
    for key in 0..4 {
        match small.insert(key, key * 10) {
            Ok(()) => println!("   inserted {}", key),
            Err(err) => println!("   {}", err),
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
