//! Per-read k-mer profiles.
//!
//! A [`ProfileBuilder`] slides a window of k bases over a read, keeping the
//! packed k-mer up to date one base at a time, and tallies every complete
//! window into a dense counter indexed by the window's position in the
//! [`KmerSpace`]. Bytes other than uppercase A/C/G/T break the window; no
//! k-mer spans them.

use crate::bio::encode_base;
use crate::bio::space::KmerSpace;
use crate::normalization::{normalize, Normalization};

/// Fixed-length feature vector, one entry per canonical k-mer in space order.
pub type ProfileVector = Vec<f64>;

pub struct ProfileBuilder<'a> {
    space: &'a KmerSpace,
    k: usize,
    mask: u64,
    window: u64,
    valid_len: usize,
    counts: Vec<u64>,
    total: u64,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(space: &'a KmerSpace) -> Self {
        let k = space.k();
        ProfileBuilder {
            space,
            k: k.get(),
            mask: k.mask(),
            window: 0,
            valid_len: 0,
            counts: vec![0; space.len()],
            total: 0,
        }
    }

    /// Feeds one symbol.
    #[inline]
    pub fn push_base(&mut self, base: u8) {
        let Some(code) = encode_base(base) else {
            self.window = 0;
            self.valid_len = 0;
            return;
        };

        self.window = ((self.window << 2) & self.mask) | code as u64;
        self.valid_len += 1;

        if self.valid_len == self.k {
            // Keep k-1 bases so the next symbol completes the following window.
            self.valid_len -= 1;
            self.counts[self.space.slot_of(self.window)] += 1;
            self.total += 1;
        }
    }

    pub fn push_sequence(&mut self, seq: &[u8]) {
        for &base in seq {
            self.push_base(base);
        }
    }

    /// Number of complete windows counted so far.
    pub fn total_kmers(&self) -> u64 {
        self.total
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn finish(self, normalization: Normalization) -> ProfileVector {
        normalize(&self.counts, self.total, normalization)
    }
}

/// Builds the profile of a single read.
pub fn profile_sequence(
    space: &KmerSpace,
    seq: &[u8],
    normalization: Normalization,
) -> ProfileVector {
    let mut builder = ProfileBuilder::new(space);
    builder.push_sequence(seq);
    builder.finish(normalization)
}
