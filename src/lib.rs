//! Canonical k-mer profiling of sequencing reads.
//!
//! Each read is turned into a fixed-length vector with one entry per
//! canonical k-mer (a k-mer and its reverse complement share an entry),
//! holding raw window counts or their frequencies. Reads are profiled in
//! parallel batches and emitted in input order.

pub mod bio;
pub mod cli;
pub mod config;
pub mod io;
pub mod normalization;
pub mod pipeline;
pub mod utils;

pub use bio::{KmerSize, KmerSpace, ProfileBuilder, ProfileVector};
pub use config::{ConfigError, ProfileConfig};
pub use normalization::Normalization;
pub use pipeline::{BatchProcessor, ProcessingError, ProcessingMetrics, ProfilePipeline};
