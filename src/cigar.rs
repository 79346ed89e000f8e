//! The CIGAR-traversal collaborator.
//!
//! `sourcequal` and `snpcaller` only need, per CIGAR operation category, a count and
//! the Phred qualities observed in that category. Decoding the BAM binary format
//! itself is `rust-htslib`'s job; once a record and its `CigarStringView` exist,
//! bucketing its operations by category is a small, self-contained walk against a
//! reference slice.

use rust_htslib::bam;
use rust_htslib::bam::record::{Cigar, CigarStringView};

use crate::errors::CigarError;

/// CIGAR operation categories the core distinguishes. Only the identity of `Match`
/// matters to `sourcequal`/`snpcaller`; the rest exist purely to bucket qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCategory {
    Match,
    Mismatch,
    Insertion,
    Deletion,
}

pub const NUM_OP_CATS: usize = 4;
pub const OP_CATEGORIES: [OpCategory; NUM_OP_CATS] = [
    OpCategory::Match,
    OpCategory::Mismatch,
    OpCategory::Insertion,
    OpCategory::Deletion,
];

/// Per-category counts and qualities returned by a `CigarOpCounter`.
#[derive(Debug, Clone, Default)]
pub struct OpCounts {
    quals: [Vec<u8>; NUM_OP_CATS],
}

impl OpCounts {
    fn index(cat: OpCategory) -> usize {
        match cat {
            OpCategory::Match => 0,
            OpCategory::Mismatch => 1,
            OpCategory::Insertion => 2,
            OpCategory::Deletion => 3,
        }
    }

    fn push(&mut self, cat: OpCategory, qual: u8) {
        self.quals[Self::index(cat)].push(qual);
    }

    pub fn count(&self, cat: OpCategory) -> usize {
        self.quals[Self::index(cat)].len()
    }

    pub fn quals(&self, cat: OpCategory) -> &[u8] {
        &self.quals[Self::index(cat)]
    }

    /// Total count across all categories.
    pub fn total(&self) -> usize {
        self.quals.iter().map(|q| q.len()).sum()
    }

    /// Total count across every non-`Match` category, including indels.
    pub fn total_non_match(&self) -> usize {
        self.total() - self.count(OpCategory::Match)
    }

    /// All qualities in traversal order, across every category (what `sourcequal`
    /// turns into an error-probability vector).
    pub fn all_quals(&self) -> Vec<u8> {
        self.quals.iter().flat_map(|q| q.iter().copied()).collect()
    }
}

/// External collaborator interface: given an alignment record and the reference
/// bytes it aligns against, bucket its CIGAR operations by category.
pub trait CigarOpCounter {
    fn count_cigar_ops(
        &self,
        record: &bam::Record,
        cigar: &CigarStringView,
        reference: &[u8],
    ) -> Result<OpCounts, CigarError>;
}

/// Default implementation: walks match/diff/equal, insertion and deletion
/// operations, splitting `Match` into `Match`/`Mismatch` by comparing against the
/// aligned reference slice. Deleted reference bases have no read quality to report;
/// they are recorded using `deleted_base_qual` (a conservative low-confidence
/// placeholder).
#[derive(Debug, Clone)]
pub struct SimpleCigarOpCounter {
    pub deleted_base_qual: u8,
}

impl Default for SimpleCigarOpCounter {
    fn default() -> Self {
        SimpleCigarOpCounter {
            deleted_base_qual: 20,
        }
    }
}

impl CigarOpCounter for SimpleCigarOpCounter {
    fn count_cigar_ops(
        &self,
        record: &bam::Record,
        cigar: &CigarStringView,
        reference: &[u8],
    ) -> Result<OpCounts, CigarError> {
        let seq = record.seq();
        let qual = record.qual();
        let read_len = seq.len();

        let mut counts = OpCounts::default();
        let mut rpos = record.pos() as usize;
        let mut qpos = 0usize;

        for op in cigar {
            match *op {
                Cigar::Match(len) | Cigar::Diff(len) | Cigar::Equal(len) => {
                    for _ in 0..len {
                        if qpos >= read_len {
                            return Err(CigarError::ReadPositionOutOfRange {
                                read_pos: qpos,
                                read_len,
                            });
                        }
                        if rpos >= reference.len() {
                            return Err(CigarError::PositionOutOfRange {
                                read_pos: qpos,
                                ref_len: reference.len(),
                            });
                        }
                        let read_base = seq[qpos].to_ascii_uppercase();
                        let ref_base = reference[rpos].to_ascii_uppercase();
                        let cat = if read_base == ref_base {
                            OpCategory::Match
                        } else {
                            OpCategory::Mismatch
                        };
                        counts.push(cat, qual[qpos]);
                        rpos += 1;
                        qpos += 1;
                    }
                }
                Cigar::Ins(len) => {
                    for _ in 0..len {
                        if qpos >= read_len {
                            return Err(CigarError::ReadPositionOutOfRange {
                                read_pos: qpos,
                                read_len,
                            });
                        }
                        counts.push(OpCategory::Insertion, qual[qpos]);
                        qpos += 1;
                    }
                }
                Cigar::Del(len) | Cigar::RefSkip(len) => {
                    for _ in 0..len {
                        if rpos >= reference.len() {
                            return Err(CigarError::PositionOutOfRange {
                                read_pos: qpos,
                                ref_len: reference.len(),
                            });
                        }
                        counts.push(OpCategory::Deletion, self.deleted_base_qual);
                        rpos += 1;
                    }
                }
                Cigar::SoftClip(len) => {
                    qpos += len as usize;
                }
                Cigar::HardClip(_) | Cigar::Pad(_) => {}
            }
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_htslib::bam::record::{Cigar as C, CigarString};

    fn record_with(cigar: Vec<C>, seq: &[u8], qual: &[u8], pos: i64) -> bam::Record {
        let mut record = bam::Record::new();
        record.set(b"read", &CigarString(cigar), seq, qual);
        record.set_pos(pos);
        record
    }

    #[test]
    fn all_matches_single_category() {
        let reference = b"ACGTACGTAC".to_vec();
        let record = record_with(vec![C::Match(6)], b"ACGTAC", &[30; 6], 0);
        let cigar = record.cigar();
        let counter = SimpleCigarOpCounter::default();
        let counts = counter.count_cigar_ops(&record, &cigar, &reference).unwrap();
        assert_eq!(counts.count(OpCategory::Match), 6);
        assert_eq!(counts.count(OpCategory::Mismatch), 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.total_non_match(), 0);
    }

    #[test]
    fn single_mismatch_is_categorized() {
        let reference = b"ACGTACGTAC".to_vec();
        // read differs from reference at position 2 (G -> T)
        let record = record_with(vec![C::Match(6)], b"ACTTAC", &[30; 6], 0);
        let cigar = record.cigar();
        let counter = SimpleCigarOpCounter::default();
        let counts = counter.count_cigar_ops(&record, &cigar, &reference).unwrap();
        assert_eq!(counts.count(OpCategory::Match), 5);
        assert_eq!(counts.count(OpCategory::Mismatch), 1);
        assert_eq!(counts.total_non_match(), 1);
    }

    #[test]
    fn insertion_and_deletion_are_counted() {
        let reference = b"ACGTACGTACGT".to_vec();
        let record = record_with(
            vec![C::Match(2), C::Ins(2), C::Match(2), C::Del(1), C::Match(2)],
            b"ACTTGTCG",
            &[30; 8],
            0,
        );
        let cigar = record.cigar();
        let counter = SimpleCigarOpCounter::default();
        let counts = counter.count_cigar_ops(&record, &cigar, &reference).unwrap();
        assert_eq!(counts.count(OpCategory::Insertion), 2);
        assert_eq!(counts.count(OpCategory::Deletion), 1);
        assert_eq!(counts.total_non_match(), 3);
    }

    #[test]
    fn deletion_running_off_the_end_of_the_reference_is_an_error() {
        let reference = b"ACGTAC".to_vec();
        // four matches consume positions 0-3, then a deletion of 4 runs rpos to 8,
        // past the 6-base reference.
        let record = record_with(vec![C::Match(4), C::Del(4)], b"ACGT", &[30; 4], 0);
        let cigar = record.cigar();
        let counter = SimpleCigarOpCounter::default();
        let result = counter.count_cigar_ops(&record, &cigar, &reference);
        assert_eq!(
            result.unwrap_err(),
            CigarError::PositionOutOfRange {
                read_pos: 4,
                ref_len: 6,
            }
        );
    }
}
