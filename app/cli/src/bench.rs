use anyhow::{Context, Result};
use htable::{HashTable, Strategy, StrategyTable, TableConfig};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;

const KEY_LENGTH: usize = 5;
const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A generated benchmark dataset
pub struct Dataset {
    pub entries: Vec<(String, u32)>,
}

impl Dataset {
    /// Generate `size` random 5-letter keys with values in 1..=1_000_000
    pub fn generate(size: usize, rng: &mut StdRng) -> Self {
        let entries = (0..size)
            .map(|_| {
                let key: String = (0..KEY_LENGTH)
                    .map(|_| char::from(KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())]))
                    .collect();
                (key, rng.gen_range(1..=1_000_000))
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Timings and table shape for one strategy at one dataset size
#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub size: usize,
    pub strategy: Strategy,
    pub insert_secs: f64,
    pub retrieve_secs: f64,
    pub remove_secs: f64,
    pub hits: usize,
    pub capacity: usize,
    pub resizes: usize,
    pub max_probe_length: usize,
}

/// Build the seeded random generator shared by every dataset of a run
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Insert, retrieve and remove the whole dataset, timing each phase.
///
/// The table starts at twice the dataset size; the rest of the
/// strategy's configuration comes from `config`.
pub fn run(strategy: Strategy, config: &TableConfig, data: &Dataset) -> Result<BenchResult> {
    let config = config.clone().with_initial_capacity((data.len() * 2).max(1));
    let mut table: StrategyTable<u32> = StrategyTable::with_config(strategy, &config);

    let start = Instant::now();
    for (key, value) in &data.entries {
        table
            .insert(key.as_str(), *value)
            .with_context(|| format!("{} insert of {:?} failed", strategy, key))?;
    }
    let insert_secs = start.elapsed().as_secs_f64();
    let stats = table.stats();

    let start = Instant::now();
    let hits = data
        .entries
        .iter()
        .filter(|(key, _)| table.get(key.as_str()).is_some())
        .count();
    let retrieve_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    for (key, _) in &data.entries {
        table.remove(key.as_str());
    }
    let remove_secs = start.elapsed().as_secs_f64();

    debug!(
        "{} size {}: {} hits, {} left after removal",
        strategy,
        data.len(),
        hits,
        table.len()
    );

    Ok(BenchResult {
        size: data.len(),
        strategy,
        insert_secs,
        retrieve_secs,
        remove_secs,
        hits,
        capacity: stats.capacity,
        resizes: stats.resizes,
        max_probe_length: stats.max_probe_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_shape() {
        let data = Dataset::generate(50, &mut seeded_rng(7));
        assert_eq!(data.len(), 50);
        for (key, value) in &data.entries {
            assert_eq!(key.len(), KEY_LENGTH);
            assert!(key.chars().all(|c| c.is_ascii_alphabetic()));
            assert!((1..=1_000_000).contains(value));
        }
    }

    #[test]
    fn test_dataset_is_reproducible() {
        let a = Dataset::generate(20, &mut seeded_rng(1));
        let b = Dataset::generate(20, &mut seeded_rng(1));
        assert_eq!(a.entries, b.entries);
    }

    #[test]
    fn test_run_finds_every_key() {
        let data = Dataset::generate(200, &mut seeded_rng(3));
        for strategy in Strategy::ALL {
            let result = run(strategy, &TableConfig::default(), &data).unwrap();
            assert_eq!(result.hits, 200);
            assert_eq!(result.size, 200);
            assert!(result.capacity >= 400);
        }
    }

    #[test]
    fn test_run_with_fixed_probing_config() {
        let config = TableConfig::new().with_probing(htable::ProbingConfig::new().fixed());
        let data = Dataset::generate(100, &mut seeded_rng(9));
        let result = run(Strategy::LinearProbing, &config, &data).unwrap();
        assert_eq!(result.capacity, 200);
        assert_eq!(result.resizes, 0);
    }
}
