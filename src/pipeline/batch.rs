//! Parallel profiling of one batch of reads.

use crate::bio::{profile_sequence, KmerSpace, ProfileVector};
use crate::normalization::Normalization;
use crate::utils::parallel::ParallelExecutor;
use log::debug;
use std::sync::Arc;

/// Profiles every read of a batch independently on a fixed worker pool.
///
/// The k-mer space is shared read-only by all workers; each read gets its own
/// builder and its result lands in the slot matching its input position.
pub struct BatchProcessor {
    space: Arc<KmerSpace>,
    normalization: Normalization,
    executor: ParallelExecutor,
}

impl BatchProcessor {
    pub fn new(
        space: Arc<KmerSpace>,
        normalization: Normalization,
        executor: ParallelExecutor,
    ) -> Self {
        BatchProcessor {
            space,
            normalization,
            executor,
        }
    }

    pub fn space(&self) -> &KmerSpace {
        &self.space
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn threads(&self) -> usize {
        self.executor.threads()
    }

    /// Returns one profile per read, in input order. An empty batch yields an empty result.
    pub fn process_batch<S>(&self, reads: &[S]) -> Vec<ProfileVector>
    where
        S: AsRef<[u8]> + Sync,
    {
        if reads.is_empty() {
            debug!("Skipping empty batch");
            return Vec::new();
        }

        let space: &KmerSpace = &self.space;
        let normalization = self.normalization;
        let profiles = self.executor.map_ordered(reads, |read| {
            profile_sequence(space, read.as_ref(), normalization)
        });

        debug!(
            "Profiled {} reads ({} dimensions, {} workers)",
            profiles.len(),
            space.len(),
            self.executor.threads()
        );
        profiles
    }
}
