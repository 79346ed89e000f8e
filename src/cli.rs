//! A standalone test harness: drives `snpcaller` with a single synthetic pileup
//! column, in the style of `./snpcaller num_success num_trials succ_prob`, for
//! comparing its p-values against an independent binomial computation.

use structopt::StructOpt;

use crate::snpcaller::call_snv_pvalues;
use crate::Thresholds;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "snvstat-harness",
    about = "Compare snpcaller p-values against a reference binomial implementation."
)]
pub struct Harness {
    /// Number of observed successes for the most frequent non-consensus base.
    pub num_success: u32,
    /// Number of independent trials (the err_probs vector length).
    pub num_trials: usize,
    /// Per-trial success probability; every entry of the synthetic err_probs vector
    /// is set to this value.
    pub succ_prob: f64,
}

/// The three p-values printed by the harness, for counts
/// `[num_success, num_success - 1, num_success - 2]`.
pub fn run(harness: &Harness) -> [f64; 3] {
    log::debug!(
        "num_success={} num_trials={} succ_prob={}",
        harness.num_success,
        harness.num_trials,
        harness.succ_prob
    );

    let err_probs = vec![harness.succ_prob; harness.num_trials];
    let counts = [
        harness.num_success,
        harness.num_success.saturating_sub(1),
        harness.num_success.saturating_sub(2),
    ];
    let thresholds = Thresholds {
        bonf_factor: 1,
        sig_level: 1.0,
    };

    call_snv_pvalues(&err_probs, &counts, &thresholds)
}
