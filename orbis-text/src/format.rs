//! Format selection at run time.

use std::fmt::Write;
use std::str::FromStr;

use orbis_types::{
    Bounds, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Position,
};
use serde::{Deserialize, Serialize};

use crate::dialect::{Coordinates, Dialect, GeoJson, Wkt, WktLike};
use crate::error::FormatError;
use crate::writer::TextWriter;

/// Text format with default options.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    /// Bare coordinate arrays, see [`Coordinates`].
    #[default]
    Coordinates,
    /// GeoJSON, see [`GeoJson`].
    GeoJson,
    /// Well-Known Text, see [`Wkt`].
    Wkt,
    /// WKT coordinates without keywords, see [`WktLike`].
    WktLike,
}

impl FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coordinates" => Ok(Self::Coordinates),
            "geojson" | "geo_json" => Ok(Self::GeoJson),
            "wkt" => Ok(Self::Wkt),
            "wkt_like" | "wktlike" => Ok(Self::WktLike),
            _ => Err(format!("unknown text format: {s}")),
        }
    }
}

/// Values that can be written by a [`TextWriter`].
pub trait ToText {
    /// Writes the value with the given writer.
    fn write_text<W: Write, D: Dialect>(
        &self,
        writer: &mut TextWriter<W, D>,
    ) -> Result<(), FormatError>;

    /// Renders the value into a string in the given format with default options.
    fn to_text(&self, format: TextFormat) -> Result<String, FormatError> {
        match format {
            TextFormat::Coordinates => render(self, Coordinates::default()),
            TextFormat::GeoJson => render(self, GeoJson::default()),
            TextFormat::Wkt => render(self, Wkt::default()),
            TextFormat::WktLike => render(self, WktLike::default()),
        }
    }
}

fn render<T: ToText + ?Sized, D: Dialect>(value: &T, dialect: D) -> Result<String, FormatError> {
    let mut writer = TextWriter::new(String::new(), dialect);
    value.write_text(&mut writer)?;
    Ok(writer.into_text())
}

macro_rules! impl_to_text {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl ToText for $ty {
                fn write_text<W: Write, D: Dialect>(
                    &self,
                    writer: &mut TextWriter<W, D>,
                ) -> Result<(), FormatError> {
                    writer.$method(self)
                }
            }
        )*
    };
}

impl_to_text!(
    Position => position,
    Bounds => bounds,
    Point => point,
    LineString => line_string,
    Polygon => polygon,
    MultiPoint => multi_point,
    MultiLineString => multi_line_string,
    MultiPolygon => multi_polygon,
    GeometryCollection => geometry_collection,
    Geometry => geometry,
);
