//! Simple feature geometries.
//!
//! All geometries are read-only value types built from [`Position`](crate::Position) and
//! [`PositionSeries`](crate::PositionSeries). Each of them may carry an explicit bounding box that encoders print
//! as is; use `calculate_bounds` to compute one from the positions.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::bounds_builder::BoundsBuilder;
use crate::coord_type::{CoordinateType, HasCoordinateType};

mod collection;
mod line_string;
mod multi;
mod point;
mod polygon;

pub use collection::GeometryCollection;
pub use line_string::LineString;
pub use multi::{MultiLineString, MultiPoint, MultiPolygon};
pub use point::Point;
pub use polygon::Polygon;

/// Kind of a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GeometryKind {
    /// Single position.
    Point,
    /// Chain of positions.
    LineString,
    /// Exterior ring followed by interior rings.
    Polygon,
    /// Set of positions.
    MultiPoint,
    /// Set of chains.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Set of arbitrary geometries.
    GeometryCollection,
}

impl GeometryKind {
    /// Name of the geometry type as used by the GeoJSON `type` member.
    pub const fn geojson_name(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }

    /// WKT keyword of the geometry type.
    pub const fn wkt_keyword(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.geojson_name())
    }
}

/// Any of the supported geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Point.
    Point(Point),
    /// Line string.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Multi point.
    MultiPoint(MultiPoint),
    /// Multi line string.
    MultiLineString(MultiLineString),
    /// Multi polygon.
    MultiPolygon(MultiPolygon),
    /// Geometry collection.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Kind of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Whether the geometry has no positions.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(v) => v.is_empty(),
            Geometry::LineString(v) => v.is_empty(),
            Geometry::Polygon(v) => v.is_empty(),
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.is_empty(),
            Geometry::MultiPolygon(v) => v.is_empty(),
            Geometry::GeometryCollection(v) => v.is_empty(),
        }
    }

    /// Explicit bounding box attached to the geometry.
    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            Geometry::Point(v) => v.bounds(),
            Geometry::LineString(v) => v.bounds(),
            Geometry::Polygon(v) => v.bounds(),
            Geometry::MultiPoint(v) => v.bounds(),
            Geometry::MultiLineString(v) => v.bounds(),
            Geometry::MultiPolygon(v) => v.bounds(),
            Geometry::GeometryCollection(v) => v.bounds(),
        }
    }

    /// Computes the bounding box from the positions of the geometry.
    pub fn calculate_bounds(&self) -> Option<Bounds> {
        let mut builder = BoundsBuilder::new(self.coord_type());
        builder.add_geometry(self);
        builder.result()
    }
}

impl HasCoordinateType for Geometry {
    fn coord_type(&self) -> CoordinateType {
        match self {
            Geometry::Point(v) => v.coord_type(),
            Geometry::LineString(v) => v.coord_type(),
            Geometry::Polygon(v) => v.coord_type(),
            Geometry::MultiPoint(v) => v.coord_type(),
            Geometry::MultiLineString(v) => v.coord_type(),
            Geometry::MultiPolygon(v) => v.coord_type(),
            Geometry::GeometryCollection(v) => v.coord_type(),
        }
    }
}

macro_rules! impl_from_geometry {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_geometry!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, PositionSeries};

    #[test]
    fn collection_resolves_lowest_type() {
        let collection = GeometryCollection::new(vec![
            Point::new(Position::xyzm(1.0, 2.0, 3.0, 4.0)).into(),
            LineString::new(PositionSeries::from_positions(&[
                Position::xyz(0.0, 0.0, 0.0),
                Position::xyz(1.0, 1.0, 1.0),
            ]))
            .into(),
        ]);

        assert_eq!(collection.coord_type(), CoordinateType::XYZ);
        assert_eq!(
            Geometry::from(collection.clone()).kind(),
            GeometryKind::GeometryCollection
        );
    }

    #[test]
    fn calculate_bounds() {
        let geometry: Geometry = MultiPoint::new(PositionSeries::from_positions(&[
            Position::xy(3.0, -1.0),
            Position::xy(-2.0, 4.0),
        ]))
        .into();

        assert_eq!(
            geometry.calculate_bounds(),
            Some(Bounds::xy(-2.0, -1.0, 3.0, 4.0))
        );
        assert_eq!(geometry.bounds(), None);
    }

    #[test]
    fn empty_geometries() {
        assert!(Geometry::from(LineString::new(PositionSeries::new(CoordinateType::XY))).is_empty());
        assert!(Geometry::from(GeometryCollection::new(vec![])).is_empty());
        assert!(Geometry::from(Point::new(Position::xy(f64::NAN, f64::NAN))).is_empty());
        assert!(!Geometry::from(Point::new(Position::xy(0.0, f64::NAN))).is_empty());
        assert_eq!(
            GeometryCollection::new(vec![]).coord_type(),
            CoordinateType::XY
        );
    }
}
