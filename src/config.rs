//! Run configuration.
//!
//! Command-line values are parsed by clap; this module turns them into a
//! [`ProfileConfig`] whose fields are known to be usable, so every
//! configuration problem surfaces before the first read is touched.

use crate::bio::kmers::{KmerError, KmerSize};
use crate::bio::space::MAX_SPACE_K;
use crate::normalization::Normalization;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Kmer(#[from] KmerError),

    #[error("Thread count must be at least 1")]
    InvalidThreadCount,

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
}

/// Validated settings for one profiling run.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Input reads (FASTQ/FASTA, optionally gzipped); `-` reads stdin.
    pub input: PathBuf,
    pub k: KmerSize,
    pub threads: usize,
    pub batch_size: usize,
    pub normalization: Normalization,
    /// Output file; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Write a header row of canonical k-mer labels.
    pub header: bool,
    /// Write a JSON run summary here.
    pub summary: Option<PathBuf>,
}

impl ProfileConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        k: usize,
        threads: usize,
        batch_size: usize,
    ) -> Result<Self, ConfigError> {
        let k = KmerSize::new(k)?;
        if k.get() > MAX_SPACE_K {
            return Err(KmerError::SpaceTooLarge {
                k: k.get(),
                max: MAX_SPACE_K,
            }
            .into());
        }
        if threads == 0 {
            return Err(ConfigError::InvalidThreadCount);
        }
        if batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }

        Ok(ProfileConfig {
            input: input.into(),
            k,
            threads,
            batch_size,
            normalization: Normalization::default(),
            output: None,
            header: false,
            summary: None,
        })
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_summary(mut self, summary: Option<PathBuf>) -> Self {
        self.summary = summary;
        self
    }
}
