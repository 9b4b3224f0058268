//! Typed positions, bounding boxes and geometries.
//!
//! Every value in this crate is tagged with a [`CoordinateType`] that says which of the optional `z` and `m`
//! components it carries. Geometries made of several parts resolve their coordinate type to the lowest common
//! type of those parts (see [`CoordinateType::resolve`]).
//!
//! The [`geo`] module contains geographic helpers: datums, coordinate reference systems, projections and
//! distance calculations.

pub mod bounds;
pub mod bounds_builder;
pub mod coord_type;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod position;
pub mod series;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use bounds::Bounds;
pub use bounds_builder::BoundsBuilder;
pub use coord_type::{CoordinateType, HasCoordinateType};
pub use error::TypesError;
pub use geometry::{
    Geometry, GeometryCollection, GeometryKind, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
pub use position::{Coordinate, Position};
pub use series::PositionSeries;
