//! The canonical k-mer space: every distinct canonical k-mer for a given k,
//! in ascending numeric order. Its length is the dimensionality of a profile
//! vector and its order is the vector's axis labelling.

use crate::bio::kmers::{canonical, decode_kmer, KmerError, KmerSize};
use log::debug;

/// Largest k whose space is enumerated. The slot table holds `4^k` entries.
pub const MAX_SPACE_K: usize = 12;

#[derive(Debug, Clone)]
pub struct KmerSpace {
    k: KmerSize,
    /// Distinct canonical ids, sorted ascending.
    ids: Vec<u64>,
    /// Position in `ids` of the canonical form of every packed k-mer.
    slots: Vec<u32>,
}

impl KmerSpace {
    /// Enumerates all `4^k` k-mers and collapses them to canonical ids.
    pub fn build(k: KmerSize) -> Result<Self, KmerError> {
        if k.get() > MAX_SPACE_K {
            return Err(KmerError::SpaceTooLarge {
                k: k.get(),
                max: MAX_SPACE_K,
            });
        }

        let total = 1usize << k.bits();
        let mut is_canonical = vec![false; total];
        for x in 0..total as u64 {
            is_canonical[canonical(x, k) as usize] = true;
        }

        // Scanning the flag table in index order yields the ids already sorted.
        let ids: Vec<u64> = is_canonical
            .iter()
            .enumerate()
            .filter_map(|(id, &present)| present.then_some(id as u64))
            .collect();

        let mut slots = vec![u32::MAX; total];
        for (pos, &id) in ids.iter().enumerate() {
            slots[id as usize] = pos as u32;
        }
        // canonical(x) <= x, so each canonical slot is filled before it is read.
        for x in 0..total {
            let id = canonical(x as u64, k) as usize;
            slots[x] = slots[id];
        }

        debug!("Built k-mer space for k={}: {} canonical k-mers", k, ids.len());
        Ok(KmerSpace { k, ids, slots })
    }

    pub fn k(&self) -> KmerSize {
        self.k
    }

    /// Profile dimensionality `D(k)`.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Vector position for a packed k-mer on either strand.
    #[inline(always)]
    pub fn slot_of(&self, kmer: u64) -> usize {
        self.slots[kmer as usize] as usize
    }

    /// Canonical k-mers as text, in vector order.
    pub fn labels(&self) -> Vec<String> {
        self.ids.iter().map(|&id| decode_kmer(id, self.k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::kmers::{encode_kmer, reverse_complement};

    fn space(n: usize) -> KmerSpace {
        KmerSpace::build(KmerSize::new(n).unwrap()).unwrap()
    }

    /// Number of canonical k-mers: palindromes only exist for even k.
    fn expected_dimension(k: usize) -> usize {
        let all = 1usize << (2 * k);
        if k % 2 == 0 {
            (all + (1usize << k)) / 2
        } else {
            all / 2
        }
    }

    #[test]
    fn test_dimension_matches_closed_form() {
        for k in 1..=9 {
            assert_eq!(space(k).len(), expected_dimension(k), "k={}", k);
        }
        assert_eq!(space(1).len(), 2);
        assert_eq!(space(2).len(), 10);
        assert_eq!(space(3).len(), 32);
    }

    #[test]
    fn test_ids_sorted_distinct_and_canonical() {
        for k in 1..=6 {
            let s = space(k);
            let size = s.k();
            assert!(s.ids().windows(2).all(|w| w[0] < w[1]));
            for &id in s.ids() {
                assert_eq!(canonical(id, size), id);
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = space(5);
        let b = space(5);
        assert_eq!(a.ids(), b.ids());
    }

    #[test]
    fn test_slot_shared_by_both_strands() {
        let s = space(4);
        let size = s.k();
        for x in 0..(1u64 << size.bits()) {
            let slot = s.slot_of(x);
            assert!(slot < s.len());
            assert_eq!(slot, s.slot_of(reverse_complement(x, size)));
            assert_eq!(s.ids()[slot], canonical(x, size));
        }
    }

    #[test]
    fn test_labels_k1() {
        assert_eq!(space(1).labels(), vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_labels_k2() {
        let s = space(2);
        let labels = s.labels();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], "AA");
        let at = encode_kmer(b"AT").unwrap();
        assert_eq!(labels[s.slot_of(at)], "AT");
        let tt = encode_kmer(b"TT").unwrap();
        assert_eq!(labels[s.slot_of(tt)], "AA");
    }

    #[test]
    fn test_rejects_oversized_space() {
        let k = KmerSize::new(MAX_SPACE_K + 1).unwrap();
        assert_eq!(
            KmerSpace::build(k).unwrap_err(),
            KmerError::SpaceTooLarge {
                k: MAX_SPACE_K + 1,
                max: MAX_SPACE_K
            }
        );
        let k = KmerSize::new(32).unwrap();
        assert!(KmerSpace::build(k).is_err());
    }
}
