//! Packed k-mer arithmetic.
//!
//! A k-mer of up to 32 bases is held in a `u64`, two bits per base, with the
//! most recent base in the low bits. This module provides:
//! - A validated k-mer size type.
//! - Reverse complement of a packed k-mer by bit manipulation.
//! - Canonical k-mer identifiers (numerically smaller of a k-mer and its reverse complement).

use crate::bio::{decode_base, encode_base};
use std::fmt;
use thiserror::Error;

/// Largest k that fits in a `u64` at two bits per base.
pub const MAX_K: usize = 32;

/// [`crate::bio::COMPLEMENT_MASK`] repeated across all 32 base positions.
const COMPLEMENT_WORD: u64 = 0xAAAA_AAAA_AAAA_AAAA;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmerError {
    #[error("Invalid k-mer size {0}: k must be between 1 and 32")]
    InvalidKmerSize(usize),

    #[error("K-mer space for k={k} is too large to enumerate (maximum k is {max})")]
    SpaceTooLarge { k: usize, max: usize },
}

/// A k-mer length that is known to fit the 2-bit packing (`1 <= k <= 32`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerSize(usize);

impl KmerSize {
    pub fn new(k: usize) -> Result<Self, KmerError> {
        if k == 0 || k > MAX_K {
            return Err(KmerError::InvalidKmerSize(k));
        }
        Ok(KmerSize(k))
    }

    #[inline(always)]
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of significant bits in a packed k-mer.
    #[inline(always)]
    pub fn bits(self) -> u32 {
        2 * self.0 as u32
    }

    /// Mask with the low `2k` bits set.
    #[inline(always)]
    pub fn mask(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }
}

impl TryFrom<usize> for KmerSize {
    type Error = KmerError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        KmerSize::new(k)
    }
}

impl fmt::Display for KmerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reverse complement of a packed k-mer.
///
/// Reverses the order of all 32 two-bit groups of the word, complements every
/// group, then shifts the `k` used groups back down to the low bits.
#[inline]
pub fn reverse_complement(kmer: u64, k: KmerSize) -> u64 {
    let mut res = kmer;
    res = ((res >> 2) & 0x3333_3333_3333_3333) | ((res & 0x3333_3333_3333_3333) << 2);
    res = ((res >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((res & 0x0F0F_0F0F_0F0F_0F0F) << 4);
    res = ((res >> 8) & 0x00FF_00FF_00FF_00FF) | ((res & 0x00FF_00FF_00FF_00FF) << 8);
    res = ((res >> 16) & 0x0000_FFFF_0000_FFFF) | ((res & 0x0000_FFFF_0000_FFFF) << 16);
    res = (res >> 32) | (res << 32);
    res ^= COMPLEMENT_WORD;
    res >> (2 * (MAX_K - k.get()))
}

/// Canonical identifier of a packed k-mer: the smaller of itself and its reverse complement.
#[inline]
pub fn canonical(kmer: u64, k: KmerSize) -> u64 {
    kmer.min(reverse_complement(kmer, k))
}

/// Packs a k-mer given as text. Returns `None` if it contains a non-nucleotide
/// or is longer than 32 bases.
pub fn encode_kmer(seq: &[u8]) -> Option<u64> {
    if seq.len() > MAX_K {
        return None;
    }
    seq.iter()
        .try_fold(0u64, |acc, &b| encode_base(b).map(|code| (acc << 2) | code as u64))
}

/// Unpacks a k-mer into its uppercase text form.
pub fn decode_kmer(kmer: u64, k: KmerSize) -> String {
    (0..k.get())
        .rev()
        .map(|i| decode_base(((kmer >> (2 * i)) & 0b11) as u8) as char)
        .collect()
}
