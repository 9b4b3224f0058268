use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::geometry::Polygon;
use crate::series::PositionSeries;

/// Multi point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    points: PositionSeries,
    bounds: Option<Bounds>,
}

impl MultiPoint {
    /// Creates a new multi point.
    pub fn new(points: PositionSeries) -> Self {
        Self {
            points,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Positions of the points.
    pub fn points(&self) -> &PositionSeries {
        &self.points
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for MultiPoint {
    fn coord_type(&self) -> CoordinateType {
        self.points.coord_type()
    }
}

/// Multi line string geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    chains: Vec<PositionSeries>,
    bounds: Option<Bounds>,
}

impl MultiLineString {
    /// Creates a new multi line string.
    pub fn new(chains: Vec<PositionSeries>) -> Self {
        Self {
            chains,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Chains of the line strings.
    pub fn chains(&self) -> &[PositionSeries] {
        &self.chains
    }

    /// Whether no member line string has a position.
    pub fn is_empty(&self) -> bool {
        self.chains.iter().all(PositionSeries::is_empty)
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for MultiLineString {
    fn coord_type(&self) -> CoordinateType {
        CoordinateType::common(&self.chains)
    }
}

/// Multi polygon geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    bounds: Option<Bounds>,
}

impl MultiPolygon {
    /// Creates a new multi polygon.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            bounds: None,
        }
    }

    /// Attaches an explicit bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Member polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Whether every member polygon is empty.
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    /// Explicit bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl HasCoordinateType for MultiPolygon {
    fn coord_type(&self) -> CoordinateType {
        CoordinateType::common(&self.polygons)
    }
}
