//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    /// A position was built from the wrong number of coordinate values.
    #[error("position has {found} coordinate values, expected one of {expected:?}")]
    InvalidPositionLength {
        /// Accepted lengths.
        expected: Vec<usize>,
        /// Length of the given array.
        found: usize,
    },

    /// A bounding box was built from the wrong number of coordinate values.
    #[error("bounding box has {found} coordinate values, expected one of {expected:?}")]
    InvalidBoundsLength {
        /// Accepted lengths.
        expected: Vec<usize>,
        /// Length of the given array.
        found: usize,
    },

    /// A flat coordinate buffer does not hold a whole number of positions.
    #[error("coordinate buffer of length {found} is not a multiple of {stride}")]
    InvalidSeriesLength {
        /// Number of values per position.
        stride: usize,
        /// Length of the given buffer.
        found: usize,
    },

    /// Projection could not be created or applied.
    #[error("projection error: {0}")]
    Projection(String),
}
