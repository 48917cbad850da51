use crate::bench::BenchResult;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned plain-text table, one block per dataset size
    Table,
    /// JSON array of results
    Json,
    /// CSV with a header row
    Csv,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Table => "table",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Write `results` to `out` in the requested format
pub fn write_report<W: Write>(
    out: &mut W,
    results: &[BenchResult],
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Table => write_table(out, results),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)
                .context("Failed to write JSON report")?;
            writeln!(out)?;
            Ok(())
        }
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for result in results {
                writer.serialize(result).context("Failed to write CSV row")?;
            }
            writer.flush().context("Failed to flush CSV report")?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(out: &mut W, results: &[BenchResult]) -> Result<()> {
    let rule = "-".repeat(50);
    let mut current_size = None;

    for result in results {
        if current_size != Some(result.size) {
            current_size = Some(result.size);
            writeln!(out, "\nTest size: {}", result.size)?;
            writeln!(out, "{}", rule)?;
            writeln!(
                out,
                "{:<15} {:<12} {:<12} {:<12}",
                "Implementation", "Insert(s)", "Retrieve(s)", "Remove(s)"
            )?;
            writeln!(out, "{}", rule)?;
        }
        writeln!(
            out,
            "{:<15} {:<12.6} {:<12.6} {:<12.6}",
            result.strategy.name(),
            result.insert_secs,
            result.retrieve_secs,
            result.remove_secs
        )?;
    }

    Ok(())
}
