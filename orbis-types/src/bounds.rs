//! Axis aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::error::TypesError;
use crate::position::{Coordinate, Position};

/// Bounding box given by its min and max corners, which share one [`CoordinateType`].
///
/// `min_x <= max_x` is not enforced: empty, degenerate and antimeridian-crossing boxes are all representable.
/// Deserialized corners are converted to their common type, as in [`Bounds::new`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBounds")]
pub struct Bounds {
    min: Position,
    max: Position,
}

impl Bounds {
    /// Creates a new box. Both corners are converted to the lowest common coordinate type of the two.
    pub fn new(min: Position, max: Position) -> Self {
        let coord_type = CoordinateType::common([min, max]);
        Self {
            min: min.with_coord_type(coord_type),
            max: max.with_coord_type(coord_type),
        }
    }

    /// Creates a 2d box.
    pub const fn xy(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Position::xy(min_x, min_y),
            max: Position::xy(max_x, max_y),
        }
    }

    /// Creates a box from a flat array `[minX, minY, (minZ), (minM), maxX, maxY, (maxZ), (maxM)]`.
    ///
    /// Without an explicit `coord_type`, 6 values are read as a 3d box and 8 values as a measured 3d box.
    pub fn from_values(
        values: &[f64],
        coord_type: Option<CoordinateType>,
    ) -> Result<Self, TypesError> {
        let coord_type = match coord_type {
            Some(coord_type) if coord_type.dimension() * 2 == values.len() => coord_type,
            Some(coord_type) => {
                return Err(TypesError::InvalidBoundsLength {
                    expected: vec![coord_type.dimension() * 2],
                    found: values.len(),
                })
            }
            None => match values.len() {
                4 => CoordinateType::XY,
                6 => CoordinateType::XYZ,
                8 => CoordinateType::XYZM,
                found => {
                    return Err(TypesError::InvalidBoundsLength {
                        expected: vec![4, 6, 8],
                        found,
                    })
                }
            },
        };

        let (min, max) = values.split_at(coord_type.dimension());
        Ok(Self {
            min: Position::from_chunk(min, coord_type),
            max: Position::from_chunk(max, coord_type),
        })
    }

    /// Min corner.
    pub fn min(&self) -> &Position {
        &self.min
    }

    /// Max corner.
    pub fn max(&self) -> &Position {
        &self.max
    }

    /// Min x value.
    pub fn min_x(&self) -> f64 {
        self.min.x()
    }

    /// Min y value.
    pub fn min_y(&self) -> f64 {
        self.min.y()
    }

    /// Max x value.
    pub fn max_x(&self) -> f64 {
        self.max.x()
    }

    /// Max y value.
    pub fn max_y(&self) -> f64 {
        self.max.y()
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.max.x() - self.min.x()
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.max.y() - self.min.y()
    }

    /// Flat components in the order `[minX, minY, (minZ), (minM), maxX, maxY, (maxZ), (maxM)]`.
    pub fn values(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.coord_type().dimension() * 2);
        self.min.write_values(&mut values);
        self.max.write_values(&mut values);
        values
    }

    /// Whether the point lies inside the box or on its border. Only `x` and `y` are compared.
    pub fn contains(&self, point: &impl Coordinate) -> bool {
        self.min.x() <= point.x()
            && self.max.x() >= point.x()
            && self.min.y() <= point.y()
            && self.max.y() >= point.y()
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &Self) -> Self {
        let coord_type = CoordinateType::common([self, other]);
        let min = |a: &Position, b: &Position| {
            Position::new(
                a.x().min(b.x()),
                a.y().min(b.y()),
                coord_type.is_3d().then(|| a.z().min(b.z())),
                coord_type.is_measured().then(|| a.m().min(b.m())),
            )
        };
        let max = |a: &Position, b: &Position| {
            Position::new(
                a.x().max(b.x()),
                a.y().max(b.y()),
                coord_type.is_3d().then(|| a.z().max(b.z())),
                coord_type.is_measured().then(|| a.m().max(b.m())),
            )
        };

        Self {
            min: min(&self.min, &other.min),
            max: max(&self.max, &other.max),
        }
    }

    /// Closed ring going around the box: `min_x,min_y -> max_x,min_y -> max_x,max_y -> min_x,max_y -> min_x,min_y`.
    ///
    /// The first and the third vertices take `z` and `m` from the min and max corners. The two other vertices
    /// lie halfway between them.
    pub fn corners(&self) -> [Position; 5] {
        let coord_type = self.coord_type();
        let mid = |a: f64, b: f64| a + (b - a) / 2.0;
        let z = coord_type.is_3d();
        let m = coord_type.is_measured();

        let lower = Position::new(
            self.min.x(),
            self.min.y(),
            z.then(|| self.min.z()),
            m.then(|| self.min.m()),
        );
        let upper = Position::new(
            self.max.x(),
            self.max.y(),
            z.then(|| self.max.z()),
            m.then(|| self.max.m()),
        );
        let middle = |x: f64, y: f64| {
            Position::new(
                x,
                y,
                z.then(|| mid(self.min.z(), self.max.z())),
                m.then(|| mid(self.min.m(), self.max.m())),
            )
        };

        [
            lower,
            middle(self.max.x(), self.min.y()),
            upper,
            middle(self.min.x(), self.max.y()),
            lower,
        ]
    }
}

#[derive(Deserialize)]
struct RawBounds {
    min: Position,
    max: Position,
}

impl From<RawBounds> for Bounds {
    fn from(raw: RawBounds) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl HasCoordinateType for Bounds {
    fn coord_type(&self) -> CoordinateType {
        self.min.coord_type()
    }
}
