//! Provides functions for normalizing k-mer count data.
//!
//! Normalization turns the raw canonical k-mer tallies of one read into a
//! frequency distribution, making profiles of reads with different lengths
//! comparable.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported normalization method: {0}")]
pub struct UnknownNormalization(pub String);

/// How a profile's counts are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Raw window counts.
    #[value(aliases = ["none", "counts"])]
    Raw,
    /// Counts divided by the number of complete windows in the read.
    #[default]
    #[value(aliases = ["freq", "relative"])]
    Frequency,
}

impl FromStr for Normalization {
    type Err = UnknownNormalization;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method.to_lowercase().as_str() {
            "raw" | "none" | "counts" => Ok(Normalization::Raw),
            "frequency" | "freq" | "relative" => Ok(Normalization::Frequency),
            _ => Err(UnknownNormalization(method.to_string())),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalization::Raw => write!(f, "raw"),
            Normalization::Frequency => write!(f, "frequency"),
        }
    }
}

/// Converts dense counts into a profile vector.
///
/// `total` is the number of windows behind `counts`; it is floored at 1 so a
/// read without any complete window yields an all-zero vector.
pub fn normalize(counts: &[u64], total: u64, method: Normalization) -> Vec<f64> {
    match method {
        Normalization::Raw => counts.iter().map(|&c| c as f64).collect(),
        Normalization::Frequency => {
            let denom = total.max(1) as f64;
            counts.iter().map(|&c| c as f64 / denom).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_methods() {
        assert_eq!("raw".parse::<Normalization>().unwrap(), Normalization::Raw);
        assert_eq!("None".parse::<Normalization>().unwrap(), Normalization::Raw);
        assert_eq!(
            "FREQUENCY".parse::<Normalization>().unwrap(),
            Normalization::Frequency
        );
        assert_eq!(
            "relative".parse::<Normalization>().unwrap(),
            Normalization::Frequency
        );
        assert_eq!(
            "tpm".parse::<Normalization>().unwrap_err(),
            UnknownNormalization("tpm".to_string())
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for method in [Normalization::Raw, Normalization::Frequency] {
            assert_eq!(method.to_string().parse::<Normalization>().unwrap(), method);
        }
    }

    #[test]
    fn test_normalize_raw() {
        assert_eq!(normalize(&[4, 0, 2], 6, Normalization::Raw), vec![4.0, 0.0, 2.0]);
    }

    #[test]
    fn test_normalize_frequency() {
        assert_eq!(
            normalize(&[3, 0, 1], 4, Normalization::Frequency),
            vec![0.75, 0.0, 0.25]
        );
    }

    #[test]
    fn test_normalize_zero_total() {
        assert_eq!(
            normalize(&[0, 0], 0, Normalization::Frequency),
            vec![0.0, 0.0]
        );
    }

    #[test]
    fn test_default_is_frequency() {
        assert_eq!(Normalization::default(), Normalization::Frequency);
    }
}
