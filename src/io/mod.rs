//! Input/Output operations module.
//!
//! Handles reading reads in batches and writing profile vectors
//! (one tab-separated row per read) and run summaries.

pub mod fastq; // Sub-module specifically for FASTQ/FASTA handling

pub use fastq::SequenceBatchReader;

use crate::bio::ProfileVector;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes profile vectors as tab-separated rows.
pub struct ProfileWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl ProfileWriter<Box<dyn Write>> {
    /// Writes to `path`, or to stdout when `path` is `None`.
    pub fn create(path: Option<&Path>) -> io::Result<Self> {
        let sink: Box<dyn Write> = match path {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        Ok(ProfileWriter::new(sink))
    }
}

impl<W: Write> ProfileWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(sink);
        ProfileWriter { writer, rows: 0 }
    }

    /// Writes a row of column labels.
    pub fn write_header<S: AsRef<str>>(&mut self, labels: &[S]) -> csv::Result<()> {
        self.writer
            .write_record(labels.iter().map(|label| label.as_ref()))
    }

    /// Writes one row per profile, in order, then flushes.
    pub fn write_batch(&mut self, profiles: &[ProfileVector]) -> csv::Result<()> {
        for profile in profiles {
            self.writer
                .write_record(profile.iter().map(|value| value.to_string()))?;
            self.rows += 1;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Number of profile rows written, not counting the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))
    }
}

/// Writes any serializable summary as pretty-printed JSON.
pub fn write_summary<T: Serialize>(summary: &T, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
