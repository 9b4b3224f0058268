use std::fmt::Write;

use orbis_types::{CoordinateType, GeometryKind};

use crate::dialect::{Dialect, GeometryHeader, Opening};
use crate::error::FormatError;
use crate::number::NumberFormat;
use crate::options::TextOptions;
use crate::state::WriterState;
use crate::writer::TextWriter;

const EMPTY: &str = "EMPTY";

/// Well-Known Text: `POINT (1 2)`, `LINESTRING Z (1 2 3,4 5 6)`, `POLYGON EMPTY`.
///
/// Axes are never swapped. Bounds are written as a `POLYGON` going around the box.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Wkt {
    options: TextOptions,
}

impl Wkt {
    /// Creates the dialect. [`TextOptions::swap_xy`] is ignored.
    pub fn new(options: TextOptions) -> Self {
        Self { options }
    }
}

impl Dialect for Wkt {
    const OPEN: char = '(';
    const CLOSE: char = ')';
    const COORD_SEPARATOR: char = ' ';

    fn number_format(&self) -> NumberFormat {
        self.options.number_format()
    }

    fn wraps_point(state: &WriterState) -> bool {
        !state.at_root_or_at_coord_array()
    }

    fn begin_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        header: &GeometryHeader<'_>,
    ) -> Result<Opening, FormatError> {
        writer.separate()?;
        write_keyword(writer, header.kind, header.coord_type)?;
        writer.write_char(' ')?;
        Ok(Opening::Geometry)
    }

    fn end_geometry<W: Write>(
        _writer: &mut TextWriter<W, Self>,
        _header: &GeometryHeader<'_>,
        _opening: Opening,
    ) -> Result<(), FormatError> {
        Ok(())
    }

    fn empty_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        kind: GeometryKind,
        coord_type: CoordinateType,
        _name: Option<&str>,
    ) -> Result<(), FormatError> {
        writer.separate()?;
        write_keyword(writer, kind, coord_type)?;
        writer.write_char(' ')?;
        writer.write_str(EMPTY)
    }

    fn empty_part<W: Write>(writer: &mut TextWriter<W, Self>) -> Result<(), FormatError> {
        writer.write_str(EMPTY)
    }
}

fn write_keyword<W: Write>(
    writer: &mut TextWriter<W, Wkt>,
    kind: GeometryKind,
    coord_type: CoordinateType,
) -> Result<(), FormatError> {
    writer.write_str(kind.wkt_keyword())?;
    let specifier = coord_type.specifier();
    if !specifier.is_empty() {
        writer.write_char(' ')?;
        writer.write_str(specifier)?;
    }
    Ok(())
}

/// WKT coordinate syntax without keywords: `1 2,3 4` for a line string, `(1 2),(1 2,3 4)` for a collection.
///
/// Empty geometries are written as `EMPTY` and bounds as the ring going around the box.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct WktLike {
    options: TextOptions,
}

impl WktLike {
    /// Creates the dialect. [`TextOptions::swap_xy`] is ignored.
    pub fn new(options: TextOptions) -> Self {
        Self { options }
    }
}

impl Dialect for WktLike {
    const OPEN: char = '(';
    const CLOSE: char = ')';
    const COORD_SEPARATOR: char = ' ';

    fn number_format(&self) -> NumberFormat {
        self.options.number_format()
    }

    fn wraps_point(state: &WriterState) -> bool {
        !state.at_root_or_at_coord_array()
    }

    fn begin_geometry<W: Write>(
        _writer: &mut TextWriter<W, Self>,
        _header: &GeometryHeader<'_>,
    ) -> Result<Opening, FormatError> {
        Ok(Opening::Inline)
    }

    fn end_geometry<W: Write>(
        _writer: &mut TextWriter<W, Self>,
        _header: &GeometryHeader<'_>,
        _opening: Opening,
    ) -> Result<(), FormatError> {
        Ok(())
    }

    fn empty_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        _kind: GeometryKind,
        _coord_type: CoordinateType,
        _name: Option<&str>,
    ) -> Result<(), FormatError> {
        writer.separate()?;
        writer.write_str(EMPTY)
    }

    fn empty_part<W: Write>(writer: &mut TextWriter<W, Self>) -> Result<(), FormatError> {
        writer.write_str(EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use orbis_types::{Bounds, LineString, MultiPoint, Point, Position, PositionSeries};

    use super::*;
    use crate::writer::{WktLikeWriter, WktWriter};

    fn series(positions: &[Position]) -> PositionSeries {
        PositionSeries::from_positions(positions)
    }

    #[test]
    fn point_and_multi_point() {
        let mut writer = WktWriter::default();
        writer.point(&Point::new(Position::xy(10.0, 20.0))).unwrap();
        assert_eq!(writer.as_text(), "POINT (10 20)");

        let mut writer = WktWriter::default();
        writer
            .multi_point(&MultiPoint::new(series(&[
                Position::xy(1.0, 2.0),
                Position::xy(3.0, 4.0),
            ])))
            .unwrap();
        assert_eq!(writer.as_text(), "MULTIPOINT (1 2,3 4)");
    }

    #[test]
    fn specifiers() {
        let mut writer = WktWriter::default();
        writer
            .point(&Point::new(Position::xyzm(1.0, 2.0, 3.0, 4.0)))
            .unwrap();
        assert_eq!(writer.as_text(), "POINT ZM (1 2 3 4)");

        let mut writer = WktWriter::default();
        writer
            .line_string(&LineString::new(series(&[
                Position::xym(1.0, 2.0, 5.0),
                Position::xym(3.0, 4.0, 6.0),
            ])))
            .unwrap();
        assert_eq!(writer.as_text(), "LINESTRING M (1 2 5,3 4 6)");
    }

    #[test]
    fn swap_is_ignored() {
        let mut writer = WktWriter::wkt(String::new(), TextOptions::default().with_swap_xy(true));
        writer.point(&Point::new(Position::xy(10.0, 20.0))).unwrap();
        assert_eq!(writer.as_text(), "POINT (10 20)");
    }

    #[test]
    fn empty_geometries() {
        let mut writer = WktWriter::default();
        writer.empty_geometry(GeometryKind::LineString).unwrap();
        assert_eq!(writer.as_text(), "LINESTRING EMPTY");

        let mut writer = WktWriter::default();
        writer
            .point(&Point::new(Position::xyz(f64::NAN, f64::NAN, 1.0)))
            .unwrap();
        assert_eq!(writer.as_text(), "POINT Z EMPTY");

        let mut writer = WktLikeWriter::default();
        writer.empty_geometry(GeometryKind::Polygon).unwrap();
        assert_eq!(writer.as_text(), "EMPTY");
    }

    #[test]
    fn bounds_as_polygon() {
        let bounds = Bounds::xy(0.0, 0.0, 2.0, 2.0);

        let mut writer = WktWriter::default();
        writer.bounds(&bounds).unwrap();
        assert_eq!(writer.as_text(), "POLYGON ((0 0,2 0,2 2,0 2,0 0))");
        assert!(writer.is_complete());

        let mut writer = WktLikeWriter::default();
        writer.bounds(&bounds).unwrap();
        assert_eq!(writer.as_text(), "(0 0,2 0,2 2,0 2,0 0)");
    }

    #[test]
    fn wkt_like_top_level() {
        let mut writer = WktLikeWriter::default();
        writer.point(&Point::new(Position::xy(1.0, 2.0))).unwrap();
        assert_eq!(writer.as_text(), "1 2");

        let mut writer = WktLikeWriter::default();
        writer
            .line_string(&LineString::new(series(&[
                Position::xy(1.0, 2.0),
                Position::xy(3.0, 4.0),
            ])))
            .unwrap();
        assert_eq!(writer.as_text(), "1 2,3 4");
    }
}
