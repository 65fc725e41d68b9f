//! Nucleotide-level utilities.
//!
//! Groups the 2-bit nucleotide codec with the packed k-mer arithmetic,
//! the canonical k-mer space and the per-read profile builder.

pub mod kmers;
pub mod profile;
pub mod space;

pub use kmers::{canonical, KmerError, KmerSize};
pub use profile::{profile_sequence, ProfileBuilder, ProfileVector};
pub use space::KmerSpace;

/// The four recognized nucleotides, in code order (`A=0, C=1, T=2, G=3`).
pub const CANONICAL_BASES: &[u8] = b"ACTG";

/// XOR pattern that maps a 2-bit code to the code of its complementary base.
pub const COMPLEMENT_MASK: u8 = 0b10;

/// Returns the 2-bit code of an uppercase nucleotide, or `None` for anything else.
///
/// The code is taken from bits 1..3 of the ASCII byte, which yields
/// `A=0, C=1, T=2, G=3`. Under that scheme `A^T` and `C^G` both equal `0b10`,
/// so complementing is a single XOR. Lowercase (soft-masked) bases are not
/// nucleotides here and break a k-mer window like `N` does.
#[inline(always)]
pub fn encode_base(base: u8) -> Option<u8> {
    match base {
        b'A' | b'C' | b'G' | b'T' => Some((base >> 1) & 0b11),
        _ => None,
    }
}

/// Returns the uppercase symbol for a 2-bit code. Only the low two bits are read.
#[inline(always)]
pub fn decode_base(code: u8) -> u8 {
    CANONICAL_BASES[(code & 0b11) as usize]
}

/// Complement of a 2-bit code.
#[inline(always)]
pub fn complement_code(code: u8) -> u8 {
    (code & 0b11) ^ COMPLEMENT_MASK
}

/// Checks if a byte represents a valid DNA base (A, C, G, T).
/// Case-sensitive: `a`, `c`, `g`, `t` are rejected.
pub fn is_valid_base(base: u8) -> bool {
    encode_base(base).is_some()
}

/// Calculates the reverse complement of a DNA sequence.
/// Case-insensitive; anything that is not a nucleotide becomes `N`.
pub fn reverse_complement(dna: &[u8]) -> Vec<u8> {
    dna.iter()
        .rev()
        .map(|&base| match encode_base(base.to_ascii_uppercase()) {
            Some(code) => decode_base(complement_code(code)),
            None => b'N',
        })
        .collect()
}
