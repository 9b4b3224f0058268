use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::position::Position;

/// Point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    position: Position,
    bounds: Option<Bounds>,
}

impl Point {
    /// Creates a new point.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Position of the point.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// A point is empty when both `x` and `y` are `NaN`.
    pub fn is_empty(&self) -> bool {
        self.position.x().is_nan() && self.position.y().is_nan()
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for Point {
    fn coord_type(&self) -> CoordinateType {
        self.position.coord_type()
    }
}

impl From<Position> for Point {
    fn from(value: Position) -> Self {
        Self::new(value)
    }
}
