//! Text encoders for [`orbis_types`] geometries.
//!
//! All formats share one engine, [`TextWriter`], which tracks the nesting of the output (geometries, coordinate
//! arrays, features, property maps) on explicit stacks and delegates the format-specific tokens to a [`Dialect`]:
//!
//! * [`Coordinates`] writes bare coordinate arrays: `[1,2],[3,4]`.
//! * [`GeoJson`] writes GeoJSON objects, including features and feature collections.
//! * [`Wkt`] writes Well-Known Text: `LINESTRING (1 2,3 4)`.
//! * [`WktLike`] writes WKT coordinate syntax without the keywords: `1 2,3 4`.
//!
//! ```
//! use orbis_text::{GeoJsonWriter, TextFormat, ToText};
//! use orbis_types::{Point, Position};
//!
//! let point = Point::new(Position::xy(10.0, 20.0));
//! assert_eq!(point.to_text(TextFormat::Wkt).unwrap(), "POINT (10 20)");
//!
//! let mut writer = GeoJsonWriter::default();
//! writer.point(&point).unwrap();
//! assert_eq!(writer.as_text(), r#"{"type":"Point","coordinates":[10.0,20.0]}"#);
//! ```

pub mod dialect;
pub mod error;
pub mod feature;
pub mod format;
pub mod number;
pub mod options;
pub mod state;
pub mod writer;

pub use dialect::{Coordinates, Dialect, GeoJson, Wkt, WktLike};
pub use error::FormatError;
pub use feature::{Feature, FeatureCollection};
pub use format::{TextFormat, ToText};
pub use number::NumberFormat;
pub use options::{GeoJsonOptions, TextOptions};
pub use writer::{CoordinatesWriter, GeoJsonWriter, TextWriter, WktLikeWriter, WktWriter};
