//! Flat storage for sequences of positions.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::bounds_builder::BoundsBuilder;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::error::TypesError;
use crate::position::{Coordinate, Position};

/// Ordered sequence of positions stored as one interleaved `f64` buffer.
///
/// Every position takes [`CoordinateType::dimension`] values of the buffer, in the order `x, y, [z], [m]`.
/// Deserialization goes through [`PositionSeries::from_values`], so a buffer with a partial position is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct PositionSeries {
    values: Vec<f64>,
    coord_type: CoordinateType,
}

impl PositionSeries {
    /// Creates an empty series.
    pub fn new(coord_type: CoordinateType) -> Self {
        Self {
            values: Vec::new(),
            coord_type,
        }
    }

    /// Wraps a flat coordinate buffer. The buffer length must be a multiple of the coordinate type dimension.
    pub fn from_values(values: Vec<f64>, coord_type: CoordinateType) -> Result<Self, TypesError> {
        let stride = coord_type.dimension();
        if values.len() % stride != 0 {
            return Err(TypesError::InvalidSeriesLength {
                stride,
                found: values.len(),
            });
        }

        Ok(Self { values, coord_type })
    }

    /// Collects positions into a series of their lowest common coordinate type.
    pub fn from_positions(positions: &[Position]) -> Self {
        let coord_type = CoordinateType::common(positions);
        let mut series = Self::new(coord_type);
        series.values.reserve(positions.len() * coord_type.dimension());
        for position in positions {
            series.push(position);
        }

        series
    }

    /// Appends a position, converting it to the series coordinate type.
    pub fn push(&mut self, position: &impl Coordinate) {
        self.values.push(position.x());
        self.values.push(position.y());
        if self.coord_type.is_3d() {
            self.values.push(position.z());
        }
        if self.coord_type.is_measured() {
            self.values.push(position.m());
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.values.len() / self.coord_type.dimension()
    }

    /// Whether the series has no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position at the given index.
    pub fn get(&self, index: usize) -> Option<Position> {
        let stride = self.coord_type.dimension();
        let chunk = self.values.get(index * stride..(index + 1) * stride)?;
        Some(Position::from_chunk(chunk, self.coord_type))
    }

    /// First position.
    pub fn first(&self) -> Option<Position> {
        self.get(0)
    }

    /// Last position.
    pub fn last(&self) -> Option<Position> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Iterates over the positions.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let coord_type = self.coord_type;
        self.values
            .chunks_exact(coord_type.dimension())
            .map(move |chunk| Position::from_chunk(chunk, coord_type))
    }

    /// The underlying flat buffer.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether the series has at least two positions and the first one equals the last one.
    pub fn is_closed(&self) -> bool {
        self.len() > 1 && self.first() == self.last()
    }

    /// Bounding box of the series, `None` if it has no real positions.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut builder = BoundsBuilder::new(self.coord_type);
        builder.add_series(self);
        builder.result()
    }
}

impl HasCoordinateType for PositionSeries {
    fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }
}

#[derive(Deserialize)]
struct RawSeries {
    values: Vec<f64>,
    coord_type: CoordinateType,
}

impl TryFrom<RawSeries> for PositionSeries {
    type Error = TypesError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Self::from_values(raw.values, raw.coord_type)
    }
}

impl FromIterator<Position> for PositionSeries {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let positions: Vec<Position> = iter.into_iter().collect();
        Self::from_positions(&positions)
    }
}
