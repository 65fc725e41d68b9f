//! Batched reading of sequencing reads.
//!
//! Leverages the `needletail` crate for parsing FASTQ and FASTA,
//! handling compressed files automatically. Only the sequence of each
//! record is kept; identifiers and qualities are dropped.

use log::{debug, warn};
use needletail::errors::{ParseError, ParseErrorKind};
use needletail::{parse_fastx_file, parse_fastx_reader, parse_fastx_stdin, FastxReader};
use std::io::Read;
use std::path::Path;

/// Yields the reads of one input as batches of at most `batch_size` sequences.
pub struct SequenceBatchReader {
    /// `None` once the input is exhausted, or from the start for an empty input.
    reader: Option<Box<dyn FastxReader>>,
    batch_size: usize,
    records_read: usize,
}

impl SequenceBatchReader {
    /// Opens a file, or stdin when `path` is `-`.
    pub fn from_path(path: &Path, batch_size: usize) -> Result<Self, ParseError> {
        let parsed = if path == Path::new("-") {
            debug!("Reading sequences from stdin");
            parse_fastx_stdin()
        } else {
            debug!("Reading sequences from {}", path.display());
            parse_fastx_file(path)
        };
        Self::from_parsed(parsed, batch_size)
    }

    pub fn from_reader<R: Read + Send + 'static>(
        reader: R,
        batch_size: usize,
    ) -> Result<Self, ParseError> {
        Self::from_parsed(parse_fastx_reader(reader), batch_size)
    }

    fn from_parsed(
        parsed: Result<Box<dyn FastxReader>, ParseError>,
        batch_size: usize,
    ) -> Result<Self, ParseError> {
        let reader = match parsed {
            Ok(reader) => Some(reader),
            Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => {
                warn!("Input contains no records");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(SequenceBatchReader {
            reader,
            batch_size: batch_size.max(1),
            records_read: 0,
        })
    }

    /// Total number of records handed out so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Reads the next batch. Returns `Ok(None)` once the input is exhausted.
    pub fn next_batch(&mut self) -> Result<Option<Vec<Vec<u8>>>, ParseError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut batch = Vec::with_capacity(self.batch_size);
        while batch.len() < self.batch_size {
            let next = reader
                .next()
                .map(|record| record.map(|r| r.seq().into_owned()));
            match next {
                Some(Ok(seq)) => batch.push(seq),
                Some(Err(e)) => {
                    self.reader = None;
                    return Err(e);
                }
                None => {
                    self.reader = None;
                    break;
                }
            }
        }

        if batch.is_empty() {
            return Ok(None);
        }
        self.records_read += batch.len();
        Ok(Some(batch))
    }
}

impl Iterator for SequenceBatchReader {
    type Item = Result<Vec<Vec<u8>>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch().transpose()
    }
}
