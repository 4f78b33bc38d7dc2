//! Convert a Commerzbank CSV export into a YNAB import file.
//!
//! Usage:
//!   ynab-statement --input umsaetze.csv
//!   ynab-statement --input umsaetze.csv --output ynab.csv --payees known_payees.json

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ynab_statement_rs::{Diagnostic, ImportConfig, ParserBuilder, RegistryPolicy, write_ynab_csv};

/// Convert Commerzbank statement exports for import into YNAB
#[derive(Parser)]
#[command(name = "ynab-statement")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Commerzbank CSV export to read
    #[arg(short, long)]
    input: PathBuf,

    /// YNAB CSV file to write (defaults to <today>-ynab.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file mapping canonical payee names to their variations
    #[arg(short, long, default_value = "known_payees.json")]
    payees: PathBuf,

    /// Abort if the payee file is missing or malformed
    #[arg(long)]
    strict_registry: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let policy = if cli.strict_registry {
        RegistryPolicy::FailFast
    } else {
        RegistryPolicy::FailSoft
    };

    let input = cli
        .input
        .to_str()
        .with_context(|| format!("Input path is not valid UTF-8: {}", cli.input.display()))?;

    let report = ParserBuilder::new()
        .filename(input)
        .payees_file(&cli.payees)
        .config(ImportConfig::new().registry_policy(policy))
        .parse()
        .with_context(|| format!("Failed to read transactions from {}", cli.input.display()))?;

    for rejected in &report.rejected {
        warn!(line = rejected.line, "Skipped: {}", rejected.error);
    }

    let output = cli.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}-ynab.csv",
            chrono::Local::now().format("%Y-%m-%d")
        ))
    });

    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_ynab_csv(BufWriter::new(file), &report.transactions)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let unknown_payees = report
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::PayeeUnknown { .. }))
        .count();

    info!(
        transactions = report.transactions.len(),
        skipped = report.rejected.len(),
        unknown_payees,
        output = %output.display(),
        "Conversion successful"
    );
    Ok(())
}
