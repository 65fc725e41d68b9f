use crate::bio::kmers::KmerError;
use crate::bio::KmerSpace;
use crate::config::ProfileConfig;
use crate::io::{write_summary, ProfileWriter, SequenceBatchReader};
use crate::normalization::Normalization;
use crate::pipeline::batch::BatchProcessor;
use crate::utils::parallel::{ParallelConfig, ParallelError, ParallelExecutor};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

// --- Error Type ---
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Needletail parsing error: {0}")]
    NeedletailError(#[from] needletail::errors::ParseError),

    #[error("Output error: {0}")]
    OutputError(#[from] csv::Error),

    #[error("K-mer error: {0}")]
    KmerError(#[from] KmerError),

    #[error("Parallel error: {0}")]
    ParallelError(#[from] ParallelError),
}

/// Processing metrics
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProcessingMetrics {
    pub reads: usize,
    pub batches: usize,
    /// Profile vector length.
    pub dimension: usize,
    pub processing_time_seconds: f64,
}

/// Settings and metrics of a finished run, as written to the JSON summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input: String,
    pub k: usize,
    pub normalization: Normalization,
    pub threads: usize,
    pub batch_size: usize,
    pub metrics: ProcessingMetrics,
}

/// Read → profile → write loop over one input.
///
/// Batches are handled strictly one after another: a batch is fully profiled
/// and written before the next one is read.
pub struct ProfilePipeline {
    config: ProfileConfig,
    processor: BatchProcessor,
}

impl ProfilePipeline {
    /// Builds the k-mer space and the worker pool for `config`.
    pub fn new(config: ProfileConfig) -> Result<Self, ProcessingError> {
        let start_time = Instant::now();
        let space = KmerSpace::build(config.k)?;
        info!(
            "K-mer space for k={}: {} canonical k-mers (built in {:.3}s)",
            config.k,
            space.len(),
            start_time.elapsed().as_secs_f64()
        );

        let executor = ParallelExecutor::new(Some(ParallelConfig {
            threads: config.threads,
        }))?;
        info!("Using {} threads.", executor.threads());

        let processor = BatchProcessor::new(Arc::new(space), config.normalization, executor);
        Ok(ProfilePipeline { config, processor })
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn processor(&self) -> &BatchProcessor {
        &self.processor
    }

    /// Profiles every batch from `reader` and writes the rows to `writer`.
    pub fn run<W: Write>(
        &self,
        reader: SequenceBatchReader,
        writer: &mut ProfileWriter<W>,
    ) -> Result<ProcessingMetrics, ProcessingError> {
        let start_time = Instant::now();
        let mut metrics = ProcessingMetrics {
            dimension: self.processor.space().len(),
            ..Default::default()
        };

        if self.config.header {
            let labels = self.processor.space().labels();
            writer.write_header(labels.as_slice())?;
        }

        for batch in reader {
            let batch = batch?;
            let profiles = self.processor.process_batch(&batch);
            writer.write_batch(&profiles)?;

            metrics.batches += 1;
            metrics.reads += batch.len();
            debug!(
                "Batch {}: {} reads ({} total)",
                metrics.batches,
                batch.len(),
                metrics.reads
            );
        }
        writer.flush()?;

        metrics.processing_time_seconds = start_time.elapsed().as_secs_f64();
        if metrics.reads == 0 {
            warn!("No reads were found in the input.");
        }
        info!(
            "Profiled {} reads in {} batches ({:.3}s).",
            metrics.reads, metrics.batches, metrics.processing_time_seconds
        );
        Ok(metrics)
    }

    /// Runs over the configured input and output, then writes the summary if requested.
    pub fn run_files(&self) -> Result<ProcessingMetrics, ProcessingError> {
        info!("Reading sequences from {}", self.config.input.display());
        let reader = SequenceBatchReader::from_path(&self.config.input, self.config.batch_size)?;
        let mut writer = ProfileWriter::create(self.config.output.as_deref())?;

        let metrics = self.run(reader, &mut writer)?;

        if let Some(path) = &self.config.summary {
            write_summary(&self.summary(&metrics), path)?;
            info!("Wrote run summary to {}", path.display());
        }
        Ok(metrics)
    }

    pub fn summary(&self, metrics: &ProcessingMetrics) -> RunSummary {
        RunSummary {
            input: self.config.input.display().to_string(),
            k: self.config.k.get(),
            normalization: self.config.normalization,
            threads: self.config.threads,
            batch_size: self.config.batch_size,
            metrics: metrics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const READS: &str = "@r1\nAAAA\n+\n!!!!\n@r2\nACGT\n+\n!!!!\n@r3\nNNNN\n+\n!!!!\n";

    fn pipeline(config: ProfileConfig) -> ProfilePipeline {
        ProfilePipeline::new(config).unwrap()
    }

    fn run_to_string(pipeline: &ProfilePipeline, content: &str) -> (String, ProcessingMetrics) {
        let reader = SequenceBatchReader::from_reader(
            Cursor::new(content.as_bytes().to_vec()),
            pipeline.config().batch_size,
        )
        .unwrap();
        let mut writer = ProfileWriter::new(Vec::new());
        let metrics = pipeline.run(reader, &mut writer).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        (out, metrics)
    }

    #[test]
    fn test_k1_frequency_output() {
        let p = pipeline(ProfileConfig::new("-", 1, 2, 2).unwrap());
        let (out, metrics) = run_to_string(&p, READS);
        assert_eq!(out, "1\t0\n0.5\t0.5\n0\t0\n");
        assert_eq!(metrics.reads, 3);
        assert_eq!(metrics.batches, 2);
        assert_eq!(metrics.dimension, 2);
    }

    #[test]
    fn test_k1_raw_output_with_header() {
        let config = ProfileConfig::new("-", 1, 1, 10)
            .unwrap()
            .with_normalization(Normalization::Raw)
            .with_header(true);
        let (out, metrics) = run_to_string(&pipeline(config), READS);
        assert_eq!(out, "A\tC\n4\t0\n2\t2\n0\t0\n");
        assert_eq!(metrics.batches, 1);
    }

    #[test]
    fn test_empty_input() {
        let p = pipeline(ProfileConfig::new("-", 3, 2, 5).unwrap());
        let (out, metrics) = run_to_string(&p, "");
        assert!(out.is_empty());
        assert_eq!(metrics.reads, 0);
        assert_eq!(metrics.batches, 0);
    }

    #[test]
    fn test_output_order_across_batches() {
        let p = pipeline(
            ProfileConfig::new("-", 2, 4, 3)
                .unwrap()
                .with_normalization(Normalization::Raw),
        );
        let seqs: Vec<String> = (0..20).map(|i| "ACG".repeat(i + 1)).collect();
        let fastq: String = seqs
            .iter()
            .enumerate()
            .map(|(i, s)| format!("@r{}\n{}\n+\n{}\n", i, s, "I".repeat(s.len())))
            .collect();

        let (out, metrics) = run_to_string(&p, &fastq);
        assert_eq!(metrics.reads, 20);
        assert_eq!(metrics.batches, 7);

        // Each ACG repeat of length 3n has 3n-1 dinucleotide windows.
        for (i, line) in out.lines().enumerate() {
            let total: f64 = line.split('\t').map(|v| v.parse::<f64>().unwrap()).sum();
            assert_eq!(total, (3 * (i + 1) - 1) as f64, "row {}", i);
        }
    }

    #[test]
    fn test_run_files_with_summary() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("reads.fq");
        let output = dir.path().join("profiles.tsv");
        let summary = dir.path().join("summary.json");
        fs::write(&input, READS).unwrap();

        let config = ProfileConfig::new(&input, 1, 2, 2)
            .unwrap()
            .with_output(Some(output.clone()))
            .with_summary(Some(summary.clone()));
        let metrics = pipeline(config).run_files().unwrap();
        assert_eq!(metrics.reads, 3);

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "1\t0\n0.5\t0.5\n0\t0\n"
        );
        let parsed: RunSummary =
            serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(parsed.k, 1);
        assert_eq!(parsed.normalization, Normalization::Frequency);
        assert_eq!(parsed.metrics.reads, 3);
        assert_eq!(parsed.metrics.dimension, 2);

        dir.close().unwrap();
    }

    #[test]
    fn test_run_files_missing_input() {
        let dir = tempdir().unwrap();
        let config = ProfileConfig::new(dir.path().join("missing.fq"), 2, 1, 1)
            .unwrap()
            .with_output(Some(dir.path().join("out.tsv")));
        let result = pipeline(config).run_files();
        assert!(matches!(result, Err(ProcessingError::NeedletailError(_))));
    }
}
