//! Error type of the text writers.

use orbis_types::{GeometryKind, TypesError};
use thiserror::Error;

use crate::state::Container;

/// Error returned by the writer methods.
///
/// Protocol violations of the writer itself (unbalanced container stacks) are not reported through this type: they
/// are bugs and panic.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A flat coordinate buffer ran out of values in the middle of a position.
    #[error("{kind} coordinates end in the middle of a position: expected {expected} values, found {found}")]
    CoordinateCount {
        /// Geometry being written.
        kind: GeometryKind,
        /// Number of values per position.
        expected: usize,
        /// Number of values left in the buffer.
        found: usize,
    },

    /// The geometry kind cannot be written from a single flat coordinate buffer.
    #[error("{0} cannot be written from a flat coordinate buffer")]
    UnsupportedKind(GeometryKind),

    /// A bounding box was written where the output has no place for it, e.g. between the features of a
    /// collection.
    #[error("a bounding box cannot be written inside {0:?}")]
    MisplacedBounds(Container),

    /// The output sink refused the text.
    #[error("failed to write to the output sink")]
    Sink(#[from] std::fmt::Error),

    /// Invalid input value.
    #[error(transparent)]
    Types(#[from] TypesError),

    /// A property value could not be serialized.
    #[error("failed to serialize a property value: {0}")]
    Json(#[from] serde_json::Error),
}
