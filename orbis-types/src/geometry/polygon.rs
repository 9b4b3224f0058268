use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::series::PositionSeries;

/// Polygon geometry: the exterior ring followed by zero or more interior rings.
///
/// Rings are expected to be closed, but this is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    rings: Vec<PositionSeries>,
    bounds: Option<Bounds>,
}

impl Polygon {
    /// Creates a new polygon from its rings, exterior first.
    pub fn new(rings: Vec<PositionSeries>) -> Self {
        Self {
            rings,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> &[PositionSeries] {
        &self.rings
    }

    /// Exterior ring.
    pub fn exterior(&self) -> Option<&PositionSeries> {
        self.rings.first()
    }

    /// Interior rings.
    pub fn interiors(&self) -> &[PositionSeries] {
        self.rings.get(1..).unwrap_or_default()
    }

    /// A polygon is empty when it has no exterior ring or the exterior ring has no positions.
    pub fn is_empty(&self) -> bool {
        self.exterior().map_or(true, PositionSeries::is_empty)
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for Polygon {
    fn coord_type(&self) -> CoordinateType {
        CoordinateType::common(&self.rings)
    }
}
