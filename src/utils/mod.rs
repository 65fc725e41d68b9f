//! Shared helpers that are not tied to sequence handling.

pub mod parallel;

pub use parallel::{ParallelConfig, ParallelError, ParallelExecutor};
