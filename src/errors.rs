use thiserror::Error;

/// Failure modes of the `CigarOpCounter` collaborator.
#[derive(Error, Debug, PartialEq)]
pub enum CigarError {
    #[error("CIGAR operation at read position {read_pos} extends past the end of the supplied reference slice (len {ref_len})")]
    PositionOutOfRange { read_pos: usize, ref_len: usize },
    #[error("CIGAR operation at read position {read_pos} extends past the end of the read ({read_len} bases)")]
    ReadPositionOutOfRange { read_pos: usize, read_len: usize },
}

/// Failure modes of `sourcequal::source_qual`.
#[derive(Error, Debug, PartialEq)]
pub enum SourceQualError {
    #[error("CIGAR traversal failed: {0}")]
    CigarTraversalFailed(#[from] CigarError),
}
