mod bench;
mod report;

use anyhow::{Context, Result};
use bench::{BenchResult, Dataset};
use clap::{Parser, Subcommand, ValueEnum};
use htable::{index_for, HashTable, Key, Strategy, StrategyTable, TableConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use report::ReportFormat;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Benchmark and correctness driver for chaining and linear-probing hash tables
#[derive(Parser)]
#[command(name = "htable")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Table configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Which table strategies to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Separate chaining
    Chaining,
    /// Linear probing
    Linear,
    /// Both strategies, chaining first
    Both,
}

impl StrategyArg {
    fn strategies(&self) -> Vec<Strategy> {
        match self {
            StrategyArg::Chaining => vec![Strategy::Chaining],
            StrategyArg::Linear => vec![Strategy::LinearProbing],
            StrategyArg::Both => Strategy::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Time bulk insert, retrieve and remove over random datasets
    Bench {
        /// Dataset sizes, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "100,1000,10000")]
        sizes: Vec<usize>,

        /// Seed for the dataset generator
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Report format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ReportFormat,

        /// Strategies to benchmark
        #[arg(long, value_enum, default_value = "both")]
        strategy: StrategyArg,
    },

    /// Run the basic insert/update/remove walk-through against each strategy
    Check {
        /// Strategies to check
        #[arg(long, value_enum, default_value = "both")]
        strategy: StrategyArg,
    },

    /// Insert keys and print the resulting table statistics as JSON
    Inspect {
        /// Strategies to inspect
        #[arg(long, value_enum, default_value = "both")]
        strategy: StrategyArg,

        /// Keys, comma separated; integers are stored as integer keys
        #[arg(short, long, value_delimiter = ',', conflicts_with = "json")]
        keys: Vec<String>,

        /// Keys as a JSON array, e.g. '["name", 42]'
        #[arg(long, value_name = "ARRAY")]
        json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity flags
    setup_logging(cli.verbose, cli.quiet);

    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else {
        TableConfig::default()
    };

    match cli.command {
        Commands::Bench {
            sizes,
            seed,
            format,
            strategy,
        } => {
            bench_command(&sizes, seed, format, strategy, &config, cli.quiet)?;
        }
        Commands::Check { strategy } => {
            check_command(strategy, &config)?;
        }
        Commands::Inspect {
            strategy,
            keys,
            json,
        } => {
            let keys = match json {
                Some(array) => parse_json_keys(&array)?,
                None => keys.iter().map(String::as_str).map(parse_key).collect(),
            };
            inspect_command(strategy, &keys, &config)?;
        }
    }

    Ok(())
}

/// Set up logging based on verbosity flags
fn setup_logging(verbose: bool, quiet: bool) {
    let log_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logging initialized at {} level", log_level);
}

/// Load and validate a JSON table configuration
fn load_config(path: &Path) -> Result<TableConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = TableConfig::from_json(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    debug!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Execute the bench command
fn bench_command(
    sizes: &[usize],
    seed: u64,
    format: ReportFormat,
    strategy: StrategyArg,
    config: &TableConfig,
    quiet: bool,
) -> Result<()> {
    if sizes.contains(&0) {
        anyhow::bail!("Dataset sizes must be greater than 0");
    }

    let start_time = Instant::now();
    let strategies = strategy.strategies();
    info!(
        "Benchmarking {} strategies over sizes {:?} (seed {})",
        strategies.len(),
        sizes,
        seed
    );

    let mut rng = bench::seeded_rng(seed);
    let mut results: Vec<BenchResult> = Vec::with_capacity(sizes.len() * strategies.len());

    for &size in sizes {
        // Both strategies see the same data
        let data = Dataset::generate(size, &mut rng);
        for &strategy in &strategies {
            let progress = create_progress_bar(quiet, &format!("{}: {} keys", strategy, size));
            let result = bench::run(strategy, config, &data)?;
            progress.finish_and_clear();

            if result.hits != size {
                warn!(
                    "{} retrieved {} of {} keys at size {}",
                    strategy, result.hits, size, size
                );
            }
            results.push(result);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &results, format)?;
    out.flush().context("Failed to flush stdout")?;

    let total_duration = start_time.elapsed();
    if !quiet && format == ReportFormat::Table {
        eprintln!("\n✓ Benchmark complete");
        eprintln!("  Runs:        {}", results.len());
        eprintln!("  Time:        {:.3}s", total_duration.as_secs_f64());
    }

    info!(
        "Benchmark ({} report) completed in {:.3}s",
        format.as_str(),
        total_duration.as_secs_f64()
    );

    Ok(())
}

/// Execute the check command
fn check_command(strategy: StrategyArg, config: &TableConfig) -> Result<()> {
    let mut failures = Vec::new();

    for strategy in strategy.strategies() {
        println!("\nTesting {} implementation:", strategy);
        println!("{}", "-".repeat(30));

        for failure in walkthrough(strategy, config)? {
            error!("{}: {}", strategy, failure);
            failures.push(format!("{}: {}", strategy, failure));
        }
    }

    if !failures.is_empty() {
        anyhow::bail!("{} check(s) failed:\n  {}", failures.len(), failures.join("\n  "));
    }

    println!("\n✓ All checks passed");
    Ok(())
}

/// Insert name/age/city, update name, remove age and look up a missing key.
///
/// Returns a description of every expectation that did not hold.
fn walkthrough(strategy: Strategy, config: &TableConfig) -> Result<Vec<String>> {
    let mut table: StrategyTable<Value> = StrategyTable::with_config(strategy, config);
    let data = [
        ("name", json!("John")),
        ("age", json!(25)),
        ("city", json!("New York")),
    ];
    let mut failures = Vec::new();
    let mut expect = |what: &str, found: Option<Value>, expected: Option<Value>| {
        if found != expected {
            failures.push(format!(
                "{}: expected {}, found {}",
                what,
                describe(expected.as_ref()),
                describe(found.as_ref())
            ));
        }
    };

    for (key, value) in &data {
        table
            .insert(*key, value.clone())
            .with_context(|| format!("Failed to insert {:?}", key))?;
    }

    for (key, value) in &data {
        let found = table.retrieve(*key);
        println!("Retrieved {}: {}", key, describe(found.as_ref()));
        expect(*key, found, Some(value.clone()));
    }

    table
        .insert("name", json!("Jane"))
        .context("Failed to update \"name\"")?;
    let found = table.retrieve("name");
    println!("Updated name: {}", describe(found.as_ref()));
    expect("updated name", found, Some(json!("Jane")));

    let removed = table.remove("age");
    let found = table.retrieve("age");
    println!("After removing age: {}", describe(found.as_ref()));
    expect("age after removal", found, None);
    expect("remove(age)", Some(json!(removed)), Some(json!(true)));

    expect("missing key", table.retrieve("country"), None);
    expect("entry count", Some(json!(table.len())), Some(json!(2)));
    expect(
        "table invariant",
        Some(json!(table.is_consistent())),
        Some(json!(true)),
    );

    Ok(failures)
}

/// Execute the inspect command
fn inspect_command(strategy: StrategyArg, keys: &[Key], config: &TableConfig) -> Result<()> {
    let mut reports = Vec::new();

    for strategy in strategy.strategies() {
        let mut table = StrategyTable::with_config(strategy, config);
        for (position, key) in keys.iter().enumerate() {
            table
                .insert(key.clone(), position)
                .with_context(|| format!("{} insert of {} failed", strategy, key))?;
        }

        let capacity = table.capacity();
        let entries: Vec<Value> = table
            .iter()
            .map(|(key, value)| {
                json!({
                    "key": key,
                    "value": value,
                    "home": index_for(key, capacity),
                })
            })
            .collect();

        reports.push(json!({
            "stats": table.stats(),
            "entries": entries,
        }));
    }

    let rendered =
        serde_json::to_string_pretty(&reports).context("Failed to serialize table statistics")?;
    println!("{}", rendered);
    Ok(())
}

/// Interpret a command-line key: integers become integer keys
fn parse_key(raw: &str) -> Key {
    match raw.parse::<i64>() {
        Ok(value) => Key::Int(value),
        Err(_) => Key::Str(raw.to_string()),
    }
}

/// Parse a JSON array of keys, rejecting values that are not strings or integers
fn parse_json_keys(array: &str) -> Result<Vec<Key>> {
    let value: Value = serde_json::from_str(array).context("Failed to parse --json keys")?;
    let Value::Array(items) = value else {
        anyhow::bail!("--json keys must be a JSON array");
    };

    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            Key::try_from(item).with_context(|| format!("Key #{} ({}) rejected", position, item))
        })
        .collect()
}

/// Render an optional value the way the walk-through prints it
fn describe(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "None".to_string(),
    }
}

/// Create a progress bar (spinner) for operations
fn create_progress_bar(quiet: bool, message: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
