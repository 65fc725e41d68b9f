//! Main entry point for the kmer_profiler application.
//!
//! Reads a FASTQ/FASTA file in batches, turns every read into a canonical
//! k-mer profile vector and writes the vectors as tab-separated rows.

use anyhow::Result;
use clap::Parser;
use kmer_profiler::cli::{run_cli, Cli};

fn main() -> Result<()> {
    // Logs go to stderr; profiles go to stdout unless --output is given.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let cli = Cli::parse();

    run_cli(cli)?;

    Ok(())
}
