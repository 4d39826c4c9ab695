use thiserror::Error;

/// Checked construction failures.
///
/// Everything else in this crate (out-of-range dimension indices,
/// out-of-range coordinates) is a precondition, not a reported error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("rank mismatch: shape has rank {expected}, stride sequence has length {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("buffer too small: layout addresses {required} elements, buffer holds {got}")]
    BufferTooSmall { required: usize, got: usize },
}
