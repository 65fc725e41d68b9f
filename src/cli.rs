use crate::config::ProfileConfig;
use crate::normalization::Normalization;
use crate::pipeline::{ProcessingMetrics, ProfilePipeline};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Compute canonical k-mer profiles for every read of a FASTQ/FASTA file.
///
/// Writes one tab-separated row per read, in input order. Values use the
/// shortest form that reads back exactly (`4`, `0.5`, `0.3333333333333333`),
/// not a fixed number of significant digits.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input reads (FASTQ or FASTA, optionally gzipped); `-` reads stdin.
    pub reads: PathBuf,

    /// K-mer size.
    pub kmer_size: usize,

    /// Number of worker threads.
    pub threads: usize,

    /// Number of reads profiled per batch.
    pub batch_size: usize,

    /// How counts are reported. Values are printed at full `f64` precision.
    #[arg(short, long, value_enum, default_value_t = Normalization::Frequency)]
    pub normalization: Normalization,

    /// Output file for the profiles (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a header row with the canonical k-mer of each column.
    #[arg(long)]
    pub header: bool,

    /// Write a JSON summary of the run to this path.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl Cli {
    /// Validates the parsed arguments into a run configuration.
    pub fn to_config(&self) -> Result<ProfileConfig> {
        let config = ProfileConfig::new(
            self.reads.clone(),
            self.kmer_size,
            self.threads,
            self.batch_size,
        )
        .context("Invalid configuration")?
        .with_normalization(self.normalization)
        .with_output(self.output.clone())
        .with_header(self.header)
        .with_summary(self.summary.clone());
        Ok(config)
    }
}

/// Main entry point for CLI
pub fn run_cli(cli: Cli) -> Result<ProcessingMetrics> {
    let config = cli.to_config()?;
    info!(
        "Starting run: k={}, normalization={}, threads={}, batch size={}",
        config.k, config.normalization, config.threads, config.batch_size
    );

    let input = config.input.display().to_string();
    let pipeline = ProfilePipeline::new(config)?;
    let metrics = pipeline
        .run_files()
        .with_context(|| format!("Failed to profile reads from {}", input))?;

    info!("Analysis finished successfully.");
    Ok(metrics)
}
