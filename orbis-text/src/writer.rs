//! The text writer engine.

use std::fmt::Write;

use orbis_types::{
    Bounds, Coordinate, CoordinateType, Geometry, GeometryCollection, GeometryKind,
    HasCoordinateType, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    Position, PositionSeries,
};

use crate::dialect::{Coordinates, Dialect, GeoJson, GeometryHeader, Opening, Wkt, WktLike};
use crate::error::FormatError;
use crate::options::{GeoJsonOptions, TextOptions};
use crate::state::{ActiveType, Container, WriterState};

/// Writer of the default coordinate array format.
pub type CoordinatesWriter<W = String> = TextWriter<W, Coordinates>;
/// GeoJSON writer.
pub type GeoJsonWriter<W = String> = TextWriter<W, GeoJson>;
/// WKT writer.
pub type WktWriter<W = String> = TextWriter<W, Wkt>;
/// Writer of WKT coordinates without keywords.
pub type WktLikeWriter<W = String> = TextWriter<W, WktLike>;

/// Writes geometries as text into a [`std::fmt::Write`] sink.
///
/// The writer keeps track of what is currently open in the output (see [`WriterState`]) and uses it to decide where
/// separators and brackets go. The tokens themselves come from the dialect `D`.
///
/// Every method writes one complete item. Writing several items into the same writer separates them with commas,
/// e.g. `1 2,3 4` for two points written by a [`WktLikeWriter`].
///
/// If a method returns an error, the output contains a partial item, but the nesting state is restored and the
/// writer can still be used.
#[derive(Debug, Clone)]
pub struct TextWriter<W, D> {
    sink: W,
    state: WriterState,
    pub(crate) dialect: D,
}

impl<W: Write, D: Dialect> TextWriter<W, D> {
    /// Creates a writer with empty state over the given sink.
    pub fn new(sink: W, dialect: D) -> Self {
        Self {
            sink,
            state: WriterState::new(),
            dialect,
        }
    }

    /// Creates a writer that appends to the sink of this one, with its own fresh state.
    ///
    /// Used to render fragments (like a GeoJSON `bbox` member) without disturbing the state of this writer.
    pub fn with_sink<E: Dialect>(&mut self, dialect: E) -> TextWriter<&mut W, E> {
        TextWriter::new(&mut self.sink, dialect)
    }

    /// Dialect of the writer.
    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Current nesting state.
    pub fn state(&self) -> &WriterState {
        &self.state
    }

    /// Whether every opened container was closed.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes any geometry.
    pub fn geometry(&mut self, geometry: &Geometry) -> Result<(), FormatError> {
        self.geometry_named(geometry, None)
    }

    /// Writes a point.
    pub fn point(&mut self, point: &Point) -> Result<(), FormatError> {
        self.point_named(point, None)
    }

    /// Writes a line string.
    pub fn line_string(&mut self, line_string: &LineString) -> Result<(), FormatError> {
        self.line_string_named(line_string, None)
    }

    /// Writes a polygon.
    pub fn polygon(&mut self, polygon: &Polygon) -> Result<(), FormatError> {
        self.polygon_named(polygon, None)
    }

    /// Writes a multi point.
    pub fn multi_point(&mut self, multi_point: &MultiPoint) -> Result<(), FormatError> {
        self.multi_point_named(multi_point, None)
    }

    /// Writes a multi line string.
    pub fn multi_line_string(
        &mut self,
        multi_line_string: &MultiLineString,
    ) -> Result<(), FormatError> {
        self.multi_line_string_named(multi_line_string, None)
    }

    /// Writes a multi polygon.
    pub fn multi_polygon(&mut self, multi_polygon: &MultiPolygon) -> Result<(), FormatError> {
        self.multi_polygon_named(multi_polygon, None)
    }

    /// Writes a geometry collection.
    pub fn geometry_collection(
        &mut self,
        collection: &GeometryCollection,
    ) -> Result<(), FormatError> {
        self.geometry_collection_named(collection, None)
    }

    /// Writes an empty 2d geometry of the given kind.
    pub fn empty_geometry(&mut self, kind: GeometryKind) -> Result<(), FormatError> {
        D::empty_geometry(self, kind, CoordinateType::XY, None)
    }

    /// Writes a bounding box in the way the dialect represents boxes.
    pub fn bounds(&mut self, bounds: &Bounds) -> Result<(), FormatError> {
        D::bounds(self, bounds)
    }

    /// Writes a single position.
    ///
    /// If no enclosing geometry pins a coordinate type, the position's own type is used.
    pub fn position(&mut self, position: &Position) -> Result<(), FormatError> {
        match self.state.active_coord_type() {
            ActiveType::Pinned(_) => self.position_item(position),
            ActiveType::Inferred => self.with_coord_type(Some(position.coord_type()), |writer| {
                writer.position_item(position)
            }),
        }
    }

    /// Low level position output.
    ///
    /// Which of `z` and `m` are printed is decided by the coordinate type pinned by the enclosing geometry. If
    /// there is none, they are printed when given, and a given `m` also forces a `z` slot, written as `0` if `z`
    /// is missing.
    pub fn emit_point(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<(), FormatError> {
        self.separate()?;
        let wrap = D::wraps_point(&self.state);
        if wrap {
            self.write_char(D::OPEN)?;
        }
        self.components(x, y, z, m)?;
        if wrap {
            self.write_char(D::CLOSE)?;
        }

        Ok(())
    }

    /// Writes a line string or a multi point whose positions are given as one flat buffer of `coord_type`
    /// positions.
    ///
    /// Fails with [`FormatError::CoordinateCount`] when the buffer ends in the middle of a position, and with
    /// [`FormatError::UnsupportedKind`] for other geometry kinds.
    pub fn series_values(
        &mut self,
        kind: GeometryKind,
        values: &[f64],
        coord_type: CoordinateType,
    ) -> Result<(), FormatError> {
        if !matches!(kind, GeometryKind::LineString | GeometryKind::MultiPoint) {
            return Err(FormatError::UnsupportedKind(kind));
        }
        if values.is_empty() {
            return D::empty_geometry(self, kind, coord_type, None);
        }

        let dimension = coord_type.dimension();
        let header = GeometryHeader::new(kind, coord_type);
        self.scoped_geometry(&header, |writer| {
            writer.coord_array(|writer| {
                for chunk in values.chunks(dimension) {
                    if chunk.len() < dimension {
                        return Err(FormatError::CoordinateCount {
                            kind,
                            expected: dimension,
                            found: chunk.len(),
                        });
                    }

                    let position = Position::from_values(chunk, Some(coord_type))?;
                    writer.position_item(&position)?;
                }

                Ok(())
            })
        })
    }

    pub(crate) fn geometry_named(
        &mut self,
        geometry: &Geometry,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        match geometry {
            Geometry::Point(v) => self.point_named(v, name),
            Geometry::LineString(v) => self.line_string_named(v, name),
            Geometry::Polygon(v) => self.polygon_named(v, name),
            Geometry::MultiPoint(v) => self.multi_point_named(v, name),
            Geometry::MultiLineString(v) => self.multi_line_string_named(v, name),
            Geometry::MultiPolygon(v) => self.multi_polygon_named(v, name),
            Geometry::GeometryCollection(v) => self.geometry_collection_named(v, name),
        }
    }

    fn point_named(&mut self, point: &Point, name: Option<&str>) -> Result<(), FormatError> {
        let header = GeometryHeader::new(GeometryKind::Point, point.coord_type())
            .with_name(name)
            .with_bounds(point.bounds());
        if point.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| writer.position_item(point.position()))
    }

    fn line_string_named(
        &mut self,
        line_string: &LineString,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        let header = GeometryHeader::new(GeometryKind::LineString, line_string.coord_type())
            .with_name(name)
            .with_bounds(line_string.bounds());
        if line_string.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| writer.series(line_string.chain()))
    }

    pub(crate) fn polygon_named(
        &mut self,
        polygon: &Polygon,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        let header = GeometryHeader::new(GeometryKind::Polygon, polygon.coord_type())
            .with_name(name)
            .with_bounds(polygon.bounds());
        if polygon.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| writer.rings(polygon.rings()))
    }

    fn multi_point_named(
        &mut self,
        multi_point: &MultiPoint,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        let header = GeometryHeader::new(GeometryKind::MultiPoint, multi_point.coord_type())
            .with_name(name)
            .with_bounds(multi_point.bounds());
        if multi_point.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| writer.series(multi_point.points()))
    }

    fn multi_line_string_named(
        &mut self,
        multi_line_string: &MultiLineString,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        let header = GeometryHeader::new(
            GeometryKind::MultiLineString,
            multi_line_string.coord_type(),
        )
        .with_name(name)
        .with_bounds(multi_line_string.bounds());
        if multi_line_string.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| writer.rings(multi_line_string.chains()))
    }

    fn multi_polygon_named(
        &mut self,
        multi_polygon: &MultiPolygon,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        let header = GeometryHeader::new(GeometryKind::MultiPolygon, multi_polygon.coord_type())
            .with_name(name)
            .with_bounds(multi_polygon.bounds());
        if multi_polygon.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| {
            writer.coord_array(|writer| {
                for polygon in multi_polygon.polygons() {
                    if polygon.is_empty() {
                        writer.separate()?;
                        D::empty_part(writer)?;
                    } else {
                        writer.rings(polygon.rings())?;
                    }
                }
                Ok(())
            })
        })
    }

    fn geometry_collection_named(
        &mut self,
        collection: &GeometryCollection,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        let header =
            GeometryHeader::new(GeometryKind::GeometryCollection, collection.coord_type())
                .with_name(name)
                .with_bounds(collection.bounds());
        if collection.is_empty() {
            return D::empty_geometry(self, header.kind, header.coord_type, name);
        }

        self.scoped_geometry(&header, |writer| {
            writer.object_array(|writer| {
                for geometry in collection.geometries() {
                    writer.geometry(geometry)?;
                }
                Ok(())
            })
        })
    }

    /// Writes the geometry header, runs `body` with the containers the dialect opened and the geometry type
    /// pinned, and writes the trailer. The containers and the pin are removed even if `body` fails.
    pub(crate) fn scoped_geometry(
        &mut self,
        header: &GeometryHeader<'_>,
        body: impl FnOnce(&mut Self) -> Result<(), FormatError>,
    ) -> Result<(), FormatError> {
        let opening = D::begin_geometry(self, header)?;
        if opening == Opening::Skipped {
            return Ok(());
        }

        let containers = opening.containers();
        for container in containers {
            self.state.push(*container);
        }
        let result = self.with_coord_type(Some(header.coord_type), body);
        for container in containers.iter().rev() {
            self.state.pop(*container);
        }
        result?;

        D::end_geometry(self, header, opening)
    }

    /// Runs `body` inside the given container.
    pub(crate) fn nested<T>(
        &mut self,
        container: Container,
        body: impl FnOnce(&mut Self) -> Result<T, FormatError>,
    ) -> Result<T, FormatError> {
        self.state.push(container);
        let result = body(self);
        self.state.pop(container);
        result
    }

    /// Runs `body` with the given coordinate type pinned.
    pub(crate) fn with_coord_type<T>(
        &mut self,
        coord_type: Option<CoordinateType>,
        body: impl FnOnce(&mut Self) -> Result<T, FormatError>,
    ) -> Result<T, FormatError> {
        self.state.push_coord_type(coord_type);
        let result = body(self);
        self.state.pop_coord_type();
        result
    }

    /// Writes an array of positions or of nested arrays. The array is not bracketed at the top level.
    pub(crate) fn coord_array(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), FormatError>,
    ) -> Result<(), FormatError> {
        self.bracketed_array(Container::CoordArray, body)
    }

    /// Writes an array of geometries or features. The array is not bracketed at the top level.
    pub(crate) fn object_array(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), FormatError>,
    ) -> Result<(), FormatError> {
        self.bracketed_array(Container::ObjectArray, body)
    }

    fn bracketed_array(
        &mut self,
        container: Container,
        body: impl FnOnce(&mut Self) -> Result<(), FormatError>,
    ) -> Result<(), FormatError> {
        self.separate()?;
        let bracketed = self.state.not_at_root();
        if bracketed {
            self.write_char(D::OPEN)?;
        }
        self.nested(container, body)?;
        if bracketed {
            self.write_char(D::CLOSE)?;
        }

        Ok(())
    }

    fn series(&mut self, series: &PositionSeries) -> Result<(), FormatError> {
        if series.is_empty() {
            self.separate()?;
            return D::empty_part(self);
        }

        self.coord_array(|writer| {
            for position in series.iter() {
                writer.position_item(&position)?;
            }
            Ok(())
        })
    }

    fn rings(&mut self, rings: &[PositionSeries]) -> Result<(), FormatError> {
        self.coord_array(|writer| {
            for ring in rings {
                writer.series(ring)?;
            }
            Ok(())
        })
    }

    pub(crate) fn position_item(&mut self, position: &impl Coordinate) -> Result<(), FormatError> {
        self.emit_point(position.x(), position.y(), position.opt_z(), position.opt_m())
    }

    /// Writes the components of one position, without separator or brackets.
    pub(crate) fn components(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<(), FormatError> {
        let active = self.state.active_coord_type();
        let print_m = self.dialect.allows_measured() && active.is_measured_or(m.is_some());
        let print_z = print_m || active.is_3d_or(z.is_some());

        let (first, second) = if self.dialect.swap_xy() {
            (y, x)
        } else {
            (x, y)
        };

        self.number(first)?;
        self.write_char(D::COORD_SEPARATOR)?;
        self.number(second)?;
        if print_z && active.is_3d_or(true) {
            self.write_char(D::COORD_SEPARATOR)?;
            self.number(z.unwrap_or(0.0))?;
        }
        if print_m {
            self.write_char(D::COORD_SEPARATOR)?;
            self.number(m.unwrap_or(0.0))?;
        }

        Ok(())
    }

    fn number(&mut self, value: f64) -> Result<(), FormatError> {
        Ok(self.dialect.number_format().write(&mut self.sink, value)?)
    }

    /// Marks an item in the innermost container and writes a comma if it is not the first one.
    pub(crate) fn separate(&mut self) -> Result<(), FormatError> {
        if self.state.mark_item() {
            self.write_char(',')?;
        }
        Ok(())
    }

    pub(crate) fn state_mut(&mut self) -> &mut WriterState {
        &mut self.state
    }

    pub(crate) fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub(crate) fn write_str(&mut self, text: &str) -> Result<(), FormatError> {
        Ok(self.sink.write_str(text)?)
    }

    pub(crate) fn write_char(&mut self, c: char) -> Result<(), FormatError> {
        Ok(self.sink.write_char(c)?)
    }
}

impl<D: Dialect> TextWriter<String, D> {
    /// Text written so far.
    pub fn as_text(&self) -> &str {
        &self.sink
    }

    /// Returns the written text.
    pub fn into_text(self) -> String {
        self.sink
    }

    /// Returns the written text as UTF-8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.sink.into_bytes()
    }
}

impl<D: Dialect + Default> Default for TextWriter<String, D> {
    fn default() -> Self {
        Self::new(String::new(), D::default())
    }
}

impl<W: Write> TextWriter<W, Coordinates> {
    /// Creates a writer of the default coordinate array format.
    pub fn coordinates(sink: W, options: TextOptions) -> Self {
        Self::new(sink, Coordinates::new(options))
    }
}

impl<W: Write> TextWriter<W, GeoJson> {
    /// Creates a GeoJSON writer.
    pub fn geojson(sink: W, options: GeoJsonOptions) -> Self {
        Self::new(sink, GeoJson::new(options))
    }
}

impl<W: Write> TextWriter<W, Wkt> {
    /// Creates a WKT writer.
    pub fn wkt(sink: W, options: TextOptions) -> Self {
        Self::new(sink, Wkt::new(options))
    }
}

impl<W: Write> TextWriter<W, WktLike> {
    /// Creates a writer of WKT coordinates without keywords.
    pub fn wkt_like(sink: W, options: TextOptions) -> Self {
        Self::new(sink, WktLike::new(options))
    }
}
