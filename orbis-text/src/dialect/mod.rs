//! Format-specific tokens and geometry headers.
//!
//! A [`Dialect`] supplies everything that differs between the text formats: bracket and separator characters, the
//! rule for wrapping single positions, the number format, and the text written before and after each geometry.
//! The structure itself (nesting, separators between items, coordinate type propagation) is handled by
//! [`TextWriter`].

use std::fmt::Write;

use orbis_types::{Bounds, CoordinateType, GeometryKind, PositionSeries, Polygon};

use crate::error::FormatError;
use crate::number::NumberFormat;
use crate::state::{Container, WriterState};
use crate::writer::TextWriter;

mod coordinates;
mod geojson;
mod wkt;

pub use coordinates::Coordinates;
pub use geojson::GeoJson;
pub use wkt::{Wkt, WktLike};

/// Description of a geometry that is about to be written.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeometryHeader<'a> {
    /// Geometry kind.
    pub kind: GeometryKind,
    /// Resolved coordinate type of the geometry. It is pinned while the geometry's positions are written.
    pub coord_type: CoordinateType,
    /// Member name when the geometry is written inside a GeoJSON feature. `None` means the main `geometry` member.
    pub name: Option<&'a str>,
    /// Explicit bounding box of the geometry.
    pub bounds: Option<&'a Bounds>,
}

impl<'a> GeometryHeader<'a> {
    /// Creates a header without name and bounds.
    pub fn new(kind: GeometryKind, coord_type: CoordinateType) -> Self {
        Self {
            kind,
            coord_type,
            name: None,
            bounds: None,
        }
    }

    /// Sets the member name.
    pub fn with_name(mut self, name: Option<&'a str>) -> Self {
        self.name = name;
        self
    }

    /// Sets the bounding box.
    pub fn with_bounds(mut self, bounds: Option<&'a Bounds>) -> Self {
        self.bounds = bounds;
        self
    }
}

/// What [`Dialect::begin_geometry`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opening {
    /// Nothing was written and the geometry must be skipped.
    Skipped,
    /// The geometry is written without an enclosing structure.
    Inline,
    /// A geometry object or keyword group was opened.
    Geometry,
    /// A geometry object was opened inside a feature object created for it.
    WrappedGeometry,
}

impl Opening {
    /// Containers to enter, outermost first, while the geometry body is written.
    pub fn containers(self) -> &'static [Container] {
        match self {
            Self::Skipped | Self::Inline => &[],
            Self::Geometry => &[Container::Geometry],
            Self::WrappedGeometry => &[Container::Feature, Container::Geometry],
        }
    }
}

/// Leaf-level tokens and geometry framing of a text format.
pub trait Dialect: Sized {
    /// Opens an array.
    const OPEN: char;
    /// Closes an array.
    const CLOSE: char;
    /// Separates the components of one position.
    const COORD_SEPARATOR: char;

    /// Format of coordinate values.
    fn number_format(&self) -> NumberFormat;

    /// Whether `y` is written before `x`.
    fn swap_xy(&self) -> bool {
        false
    }

    /// Whether `m` values can be written at all.
    fn allows_measured(&self) -> bool {
        true
    }

    /// Whether a single position written in the given state gets its own brackets.
    fn wraps_point(state: &WriterState) -> bool {
        state.not_at_root()
    }

    /// Writes what precedes the geometry body.
    fn begin_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        header: &GeometryHeader<'_>,
    ) -> Result<Opening, FormatError>;

    /// Writes what follows the geometry body. Called with the containers of `opening` already closed.
    fn end_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        header: &GeometryHeader<'_>,
        opening: Opening,
    ) -> Result<(), FormatError>;

    /// Writes a geometry without positions.
    fn empty_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        kind: GeometryKind,
        coord_type: CoordinateType,
        name: Option<&str>,
    ) -> Result<(), FormatError>;

    /// Writes an empty member of a multi geometry or an empty polygon ring. By default an empty array is written.
    fn empty_part<W: Write>(writer: &mut TextWriter<W, Self>) -> Result<(), FormatError> {
        writer.write_char(Self::OPEN)?;
        writer.write_char(Self::CLOSE)
    }

    /// Writes a bounding box. By default the box is written as a polygon ring going around it.
    fn bounds<W: Write>(
        writer: &mut TextWriter<W, Self>,
        bounds: &Bounds,
    ) -> Result<(), FormatError> {
        let ring = PositionSeries::from_positions(&bounds.corners());
        writer.polygon_named(&Polygon::new(vec![ring]), None)
    }
}
