//! Per-read "source quality": an estimate of the probability that an aligned read
//! did not originate from the reference at all, expressed as a Phred score.
//!
//! This reuses the same Poisson-binomial machinery as `snpcaller`, but judges a
//! read's own non-match positions against the null hypothesis that they are all
//! independent errors, rather than judging a pileup column's non-consensus counts.

use itertools::Itertools;
use rust_htslib::bam;
use rust_htslib::bam::record::CigarStringView;

use crate::cigar::CigarOpCounter;
use crate::errors::SourceQualError;
use crate::phred::{phred_to_prob, prob_to_phred};
use crate::poissbin::poissbin;
use crate::Thresholds;

/// Bonferroni parameters `source_qual` always uses internally, fixed at a stricter
/// significance level than the per-column caller since a read judged here is thrown
/// away entirely rather than merely down-weighted.
const SOURCE_QUAL_THRESHOLDS: Thresholds = Thresholds {
    bonf_factor: 1,
    sig_level: 0.05,
};

/// Tunables for `source_qual` covering a couple of genuinely open judgment calls in
/// how a read's own candidate-variant position should be weighed.
#[derive(Debug, Clone, Copy)]
pub struct SourceQualOptions {
    /// Whether to discount the candidate SNV itself from the non-match count before
    /// calling into `poissbin` (`num_non_matches -= 1`). Defaults to `true`: the
    /// position under evaluation is not itself evidence that the read is foreign,
    /// so it should not count against the read. Flipping it to `false` judges the
    /// full non-match count instead, including the site under evaluation.
    pub discount_candidate_site: bool,
}

impl Default for SourceQualOptions {
    fn default() -> Self {
        SourceQualOptions {
            discount_candidate_site: true,
        }
    }
}

/// Estimate the probability that `record` did not originate from `reference`,
/// expressed as a Phred-scaled integer in `[0, 255]`.
///
/// Does not implement "quality softening" (replacing mismatch qualities with lower
/// values before building the error-probability vector): only the raw-quality path
/// is implemented here.
pub fn source_qual(
    counter: &dyn CigarOpCounter,
    record: &bam::Record,
    cigar: &CigarStringView,
    reference: &[u8],
    options: SourceQualOptions,
) -> Result<u8, SourceQualError> {
    let op_counts = counter.count_cigar_ops(record, cigar, reference)?;

    let num_non_matches = if options.discount_candidate_site && op_counts.total_non_match() > 0 {
        op_counts.total_non_match() - 1
    } else {
        op_counts.total_non_match()
    };

    if num_non_matches == 0 {
        return Ok(prob_to_phred(0.0));
    }

    let err_probs: Vec<f64> = op_counts
        .all_quals()
        .iter()
        .map(|&q| phred_to_prob(q))
        .sorted_by(|a, b| a.partial_cmp(b).unwrap())
        .collect();

    let result = poissbin(&err_probs, num_non_matches, &SOURCE_QUAL_THRESHOLDS);
    let src_prob = result.probvec.tailsum(num_non_matches - 1, num_non_matches).exp();

    Ok(prob_to_phred(1.0 - src_prob))
}
