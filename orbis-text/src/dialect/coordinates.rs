use std::fmt::Write;

use orbis_types::{Bounds, CoordinateType, GeometryKind, HasCoordinateType};

use crate::dialect::{Dialect, GeometryHeader, Opening};
use crate::error::FormatError;
use crate::number::NumberFormat;
use crate::options::TextOptions;
use crate::writer::TextWriter;

/// The default format: nested JSON-like coordinate arrays without any geometry framing.
///
/// A line string is written as `[1,2],[3,4]` at the top level, and bounds as a flat `minX,minY,maxX,maxY` list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    options: TextOptions,
    ignore_measured: bool,
}

impl Coordinates {
    /// Creates the dialect.
    pub fn new(options: TextOptions) -> Self {
        Self {
            options,
            ignore_measured: false,
        }
    }

    /// Sets whether `m` values are dropped.
    pub fn with_ignore_measured(mut self, ignore_measured: bool) -> Self {
        self.ignore_measured = ignore_measured;
        self
    }

    /// Options of the dialect.
    pub fn options(&self) -> &TextOptions {
        &self.options
    }
}

impl Dialect for Coordinates {
    const OPEN: char = '[';
    const CLOSE: char = ']';
    const COORD_SEPARATOR: char = ',';

    fn number_format(&self) -> NumberFormat {
        self.options.number_format()
    }

    fn swap_xy(&self) -> bool {
        self.options.swap_xy
    }

    fn allows_measured(&self) -> bool {
        !self.ignore_measured
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
        writer.write_char(Self::OPEN)?;
        writer.write_char(Self::CLOSE)
    }

    fn bounds<W: Write>(
        writer: &mut TextWriter<W, Self>,
        bounds: &Bounds,
    ) -> Result<(), FormatError> {
        writer.separate()?;
        let bracketed = writer.state().not_at_root();
        if bracketed {
            writer.write_char(Self::OPEN)?;
        }

        writer.with_coord_type(Some(bounds.coord_type()), |writer| {
            let (min, max) = (bounds.min(), bounds.max());
            writer.components(min.x(), min.y(), min.opt_z(), min.opt_m())?;
            writer.write_char(',')?;
            writer.components(max.x(), max.y(), max.opt_z(), max.opt_m())
        })?;

        if bracketed {
            writer.write_char(Self::CLOSE)?;
        }
        Ok(())
    }
}
