//! Pruned Poisson-binomial forward recurrence.
//!
//! For N independent Bernoulli trials with distinct success probabilities
//! `err_probs[0..N]`, computes `probvec[k] = log P(exactly k successes)` for
//! `k < K`, and collapses `probvec[K]` into `log P(at least K successes)` once
//! `n > K`. The recurrence is pruned against a Bonferroni-corrected significance
//! threshold: once the running tail probability at index K can no longer reach
//! significance, there is nothing left for any caller to learn, so the loop returns
//! immediately.

use crate::logmath::{log_sum, LOGZERO};
use crate::Thresholds;

/// A dense log-probability vector produced by [`poissbin`].
///
/// `probvec[k]` is `log P(exactly k successes)` for `k` below the vector's highest
/// index, and `log P(at least k successes)` at the highest index (the recurrence
/// collapses the tail there once the forward pass runs past `K`).
#[derive(Clone, Debug)]
pub struct LogProbVector(Vec<f64>);

impl LogProbVector {
    /// Number of entries, i.e. `K + 1`.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `log(sum(exp(self[i])) for i in [start, end))`.
    pub fn tailsum(&self, start: usize, end: usize) -> f64 {
        crate::logmath::probvec_tailsum(&self.0, start, end)
    }
}

impl std::ops::Index<usize> for LogProbVector {
    type Output = f64;

    fn index(&self, k: usize) -> &f64 {
        &self.0[k]
    }
}

/// Result of a [`poissbin`] call: the full log-probability vector, plus the
/// probability of at least K successes pulled out for convenience (`exp(probvec[K])`).
#[derive(Clone, Debug)]
pub struct PoissBinResult {
    pub probvec: LogProbVector,
    pub pvalue: f64,
}

/// When a trial's success/failure probability falls below this, substitute it to
/// avoid `ln(0)`. Bounds the relative error introduced and prevents `-inf` from
/// propagating through the rest of the recurrence.
const EPS: f64 = f64::EPSILON;

/// Compute the pruned Poisson-binomial distribution up to `k` successes.
///
/// `err_probs` must already be sorted ascending (callers own that invariant; see
/// `sourcequal` and the module docs on `snpcaller` for why sorting matters for
/// pruning performance). `err_probs.len()` must be `>= k` whenever `k > 0`.
pub fn poissbin(err_probs: &[f64], k: usize, thresholds: &Thresholds) -> PoissBinResult {
    let n = err_probs.len();
    debug_assert!(
        err_probs
            .iter()
            .all(|&p| p + EPS >= 0.0 && p - EPS <= 1.0),
        "error probabilities must lie in [0, 1]"
    );

    debug_assert!(k <= n || n == 0, "K must not exceed N");

    if n == 0 || k == 0 {
        return PoissBinResult {
            probvec: LogProbVector(vec![0.0]),
            pvalue: 1.0,
        };
    }

    let mut prev = vec![LOGZERO; k + 1];
    let mut cur = vec![LOGZERO; k + 1];
    prev[0] = 0.0; // log(1.0)

    let mut pvalue = f64::MAX;

    for (i, &p) in err_probs.iter().enumerate() {
        let n_trial = i + 1;

        let log_p = if p.abs() < EPS { EPS.ln() } else { p.ln() };
        let log_q = if (p - 1.0).abs() < EPS {
            (-p + EPS).ln_1p()
        } else {
            (-p).ln_1p()
        };

        if n_trial < k {
            prev[n_trial] = LOGZERO;
        }

        let top = std::cmp::min(n_trial, k - 1);
        for kk in (1..=top).rev() {
            debug_assert!(prev[kk] <= EPS && prev[kk - 1] <= EPS);
            cur[kk] = log_sum(prev[kk] + log_q, prev[kk - 1] + log_p);
        }
        debug_assert!(prev[0] <= EPS);
        cur[0] = prev[0] + log_q;

        if n_trial == k {
            cur[k] = prev[k - 1] + log_p;
        } else if n_trial > k {
            debug_assert!(prev[k] - EPS <= 0.0 && prev[k - 1] - EPS <= 0.0);
            cur[k] = log_sum(prev[k], prev[k - 1] + log_p);
            pvalue = cur[k].exp();

            if pvalue * thresholds.bonf_factor as f64 >= thresholds.sig_level {
                std::mem::swap(&mut prev, &mut cur);
                break;
            }
        }

        debug_assert!(!cur[0].is_infinite(), "probvec[0] collapsed to -inf");

        std::mem::swap(&mut prev, &mut cur);
    }

    if n == k {
        pvalue = prev[k].exp();
    }

    PoissBinResult {
        probvec: LogProbVector(prev),
        pvalue,
    }
}

/// Unpruned forward recurrence without the Bonferroni short-circuit. Computing the
/// full distribution this way is numerically sound but wastes work whenever a caller
/// only needs a handful of tail probabilities; kept as a named, documented stub so
/// callers that reach for it by name get a clear panic instead of a missing symbol.
#[deprecated(note = "disabled; use poissbin instead")]
#[allow(dead_code)]
fn naive_calc_prob_dist(_err_probs: &[f64], _k: usize) -> ! {
    panic!("naive_calc_prob_dist is disabled; use poissbin instead")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn thresholds(bonf_factor: u64, sig_level: f64) -> Thresholds {
        Thresholds {
            bonf_factor,
            sig_level,
        }
    }

    #[test]
    fn zero_trials_or_zero_k_is_trivial() {
        let r = poissbin(&[], 5, &thresholds(1, 1.0));
        assert_relative_eq!(r.probvec[0].exp(), 1.0);

        let r = poissbin(&[0.1, 0.2], 0, &thresholds(1, 1.0));
        assert_relative_eq!(r.probvec[0].exp(), 1.0);
    }

    #[test]
    fn all_zero_error_probs_never_succeed() {
        let probs = vec![0.0; 20];
        let r = poissbin(&probs, 3, &thresholds(1, 1.0));
        assert_relative_eq!(r.probvec.tailsum(3, 4).exp(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn all_one_error_probs_always_succeed() {
        let probs = vec![1.0; 50];
        let r = poissbin(&probs, 1, &thresholds(1, 1.0));
        assert_relative_eq!(r.pvalue, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn k_equals_n_runs_exact_no_pruning() {
        let probs = vec![0.1, 0.2, 0.3];
        let r = poissbin(&probs, 3, &thresholds(1, 1.0));
        // exact probability of all three succeeding
        let expected = (0.1f64 * 0.2 * 0.3).ln();
        assert_relative_eq!(r.probvec[3], expected, epsilon = 1e-9);
    }

    #[test]
    fn normalizes_to_at_most_one_without_pruning() {
        let probs = vec![0.05, 0.1, 0.2, 0.3, 0.02];
        let r = poissbin(&probs, probs.len(), &thresholds(1, 1.0));
        let total: f64 = (0..=probs.len()).map(|k| r.probvec[k].exp()).sum();
        assert!(total <= 1.0 + 1e-9);
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn monotonic_in_k() {
        let probs = vec![0.01; 200];
        let thresh = thresholds(1, 1.0);
        let r5 = poissbin(&probs, 5, &thresh);
        let r10 = poissbin(&probs, 10, &thresh);
        // P(>=5) computed from the K=10 run's tail must not exceed P(>=5) from the K=5 run.
        assert!(r10.probvec.tailsum(5, 11).exp() <= r5.probvec[5].exp() + 1e-9);
    }

    #[test]
    fn pruning_short_circuits_for_tiny_sig_level() {
        let probs = vec![0.0001; 10000];
        // A vanishingly small sig_level forces an early exit long before n reaches N.
        let r = poissbin(&probs, 4, &thresholds(1, 1e-12));
        assert!(r.pvalue * 1.0 >= 1e-12);
    }

    #[test]
    fn matches_exact_binomial_tail_small_np() {
        // scipy.stats.binom_test reference values for N=10000, p=0.0001
        let probs = vec![0.0001; 10000];
        let thresh = thresholds(1, 1.0);
        let r = poissbin(&probs, 4, &thresh);
        assert_relative_eq!(r.probvec.tailsum(4, 5).exp(), 0.018982025450177534, epsilon = 1e-6);
        assert_relative_eq!(r.probvec.tailsum(3, 5).exp(), 0.080292199242652212, epsilon = 1e-6);
        assert_relative_eq!(r.probvec.tailsum(2, 5).exp(), 0.26424111735042727, epsilon = 1e-6);
    }
}
