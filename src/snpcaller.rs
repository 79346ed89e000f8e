//! Per-pileup-column SNV calling: turns a `poissbin` run into up to three p-values,
//! one per non-consensus base.

use crate::poissbin::poissbin;
use crate::Thresholds;

pub const NUM_NONCONS_BASES: usize = 3;

/// Observed non-consensus base counts at a pileup column, one per non-consensus
/// nucleotide, in the caller's fixed allele-to-index convention.
pub type NonConsensusCounts = [u32; NUM_NONCONS_BASES];

/// Compute a p-value for each non-consensus allele at a single pileup column.
///
/// `err_probs` must already be sorted ascending (the caller is expected to have
/// built it via `sourcequal`'s conventions, or directly from Phred qualities via
/// `phred::phred_to_prob` followed by a sort). Every slot of the result is
/// preinitialized to `f64::MAX` ("not significant"); slots whose count is zero, or
/// whose significance was pruned away by the Bonferroni short-circuit, keep that
/// sentinel.
///
/// Returned p-values are monotone non-increasing as counts grow: for a fixed column,
/// `counts[a] >= counts[b]` implies `p_values[a] <= p_values[b]`, since both are tail
/// sums over the same underlying `probvec`.
pub fn call_snv_pvalues(
    err_probs: &[f64],
    counts: &NonConsensusCounts,
    thresholds: &Thresholds,
) -> [f64; NUM_NONCONS_BASES] {
    let mut p_values = [f64::MAX; NUM_NONCONS_BASES];

    let k = *counts.iter().max().unwrap() as usize;
    if k == 0 {
        return p_values;
    }

    let result = poissbin(err_probs, k, thresholds);

    if result.pvalue * thresholds.bonf_factor as f64 >= thresholds.sig_level {
        return p_values;
    }

    for (i, &count) in counts.iter().enumerate() {
        if count > 0 {
            p_values[i] = result.probvec.tailsum(count as usize, k + 1).exp();
        }
    }

    p_values
}
