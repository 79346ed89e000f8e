//! Statistical core of a low-frequency SNV caller.
//!
//! This crate implements the numerically sensitive parts of calling single-nucleotide
//! variants from short-read pileups at low allele frequency:
//!
//! - [`logmath`]: stable log-space addition, subtraction and tail sums.
//! - [`poissbin`]: a pruned Poisson-binomial forward recurrence.
//! - [`snpcaller`]: per-pileup-column p-values for up to three non-consensus bases.
//! - [`sourcequal`]: per-read probability that a read did not originate from the
//!   reference, expressed as a Phred score.
//!
//! BAM/SAM decoding, reference loading, pileup construction across a region,
//! multiple-testing bookkeeping and VCF output are left to a calling pipeline; this
//! crate consumes already-parsed `rust-htslib` records and already-loaded reference
//! bytes. The [`cigar`] module is the one piece of that pipeline this crate does
//! supply a concrete implementation of, since without it the rest of the crate has
//! no runnable end-to-end path; see its module docs for why that is in scope here.

pub mod cigar;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logmath;
pub mod phred;
pub mod poissbin;
pub mod snpcaller;
pub mod sourcequal;

pub use cigar::NUM_OP_CATS;
pub use config::Thresholds;
pub use logmath::LOGZERO;
pub use snpcaller::NUM_NONCONS_BASES;
