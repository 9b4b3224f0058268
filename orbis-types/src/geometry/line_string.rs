use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::series::PositionSeries;

/// Line string geometry: an ordered chain of positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    chain: PositionSeries,
    bounds: Option<Bounds>,
}

impl LineString {
    /// Creates a new line string.
    pub fn new(chain: PositionSeries) -> Self {
        Self {
            chain,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Positions of the line string.
    pub fn chain(&self) -> &PositionSeries {
        &self.chain
    }

    /// Whether the line string has no positions.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for LineString {
    fn coord_type(&self) -> CoordinateType {
        self.chain.coord_type()
    }
}
