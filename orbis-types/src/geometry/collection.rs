use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::geometry::Geometry;

/// Collection of arbitrary geometries, possibly other collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    bounds: Option<Bounds>,
}

impl GeometryCollection {
    /// Creates a new collection.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Member geometries.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Whether the collection has no members.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for GeometryCollection {
    fn coord_type(&self) -> CoordinateType {
        CoordinateType::common(&self.geometries)
    }
}
