//! Fnspan CLI - command-line interface for function span extraction

#![deny(warnings)]

// Global invariants enforced:
// - Files are processed strictly in sequence
// - The destination is appended to unless --truncate is passed

use clap::Parser;
use fnspan_core::{extract, ExtractOptions, FileSink, RecordFormat, DEFAULT_OUTPUT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fnspan")]
#[command(about = "Extract function definition line spans from C and C++ sources")]
struct Cli {
    /// Source files or directories to scan
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Destination file for extracted records
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Reset the destination once before this run instead of appending
    #[arg(long)]
    truncate: bool,

    /// Drop records already written during this run (e.g. a header-defined
    /// function visited once per including translation unit)
    #[arg(long)]
    dedup: bool,

    /// Record serialization format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Validate inputs before touching the destination
    for path in &cli.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let format = match cli.format {
        OutputFormat::Text => RecordFormat::Text,
        OutputFormat::Json => RecordFormat::Json,
    };

    let mut sink = if cli.truncate {
        FileSink::truncating(&cli.output, format)?
    } else {
        FileSink::appending(&cli.output, format)
    };

    let summary = extract(&cli.paths, &mut sink, &ExtractOptions { dedup: cli.dedup })?;

    println!(
        "Extracted {} record(s) from {} file(s) to {}",
        summary.records,
        summary.files,
        cli.output.display()
    );

    Ok(())
}
