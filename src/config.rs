//! Calling parameters that are threaded through `poissbin` and `snpcaller`.
//!
//! Kept as a small `serde`-(de)serializable struct, rather than bare literals at call
//! sites, so a calling pipeline can load them from a scenario YAML file the same way
//! the rest of this ecosystem keeps run parameters in structured config.

use serde_derive::{Deserialize, Serialize};

/// Bonferroni pruning parameters for a `poissbin`/`snpcaller` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Multiple-testing correction factor. Must be a positive integer.
    pub bonf_factor: u64,
    /// Significance level the corrected p-value is compared against. Must be a
    /// finite positive real.
    pub sig_level: f64,
}

impl Thresholds {
    pub fn new(bonf_factor: u64, sig_level: f64) -> Self {
        debug_assert!(bonf_factor > 0, "bonf_factor must be positive");
        debug_assert!(
            sig_level.is_finite() && sig_level > 0.0,
            "sig_level must be a finite positive real"
        );
        Thresholds {
            bonf_factor,
            sig_level,
        }
    }
}

impl Default for Thresholds {
    /// No Bonferroni correction, significance level 1.0 (i.e. effectively unpruned,
    /// the setting used by the standalone test harness binary).
    fn default() -> Self {
        Thresholds {
            bonf_factor: 1,
            sig_level: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_yaml() {
        let t = Thresholds::new(20, 0.05);
        let yaml = serde_yaml::to_string(&t).unwrap();
        let back: Thresholds = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn round_trips_through_json() {
        let t = Thresholds::new(20, 0.05);
        let json = serde_json::to_string(&t).unwrap();
        let back: Thresholds = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
