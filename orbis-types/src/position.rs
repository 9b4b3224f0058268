//! Positions and the [`Coordinate`] read-only view.

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::error::TypesError;

/// Read-only access to the components of a single position.
///
/// `z` and `m` are optional: [`Coordinate::opt_z`] and [`Coordinate::opt_m`] return `None` when the value does not
/// carry the component, while [`Coordinate::z`] and [`Coordinate::m`] return `0.0` in that case.
pub trait Coordinate {
    /// X (or longitude) component.
    fn x(&self) -> f64;
    /// Y (or latitude) component.
    fn y(&self) -> f64;
    /// Z component, if present.
    fn opt_z(&self) -> Option<f64>;
    /// M component, if present.
    fn opt_m(&self) -> Option<f64>;

    /// Z component or `0.0`.
    fn z(&self) -> f64 {
        self.opt_z().unwrap_or(0.0)
    }

    /// M component or `0.0`.
    fn m(&self) -> f64 {
        self.opt_m().unwrap_or(0.0)
    }

    /// Coordinate type derived from the present components.
    fn coordinate_type(&self) -> CoordinateType {
        CoordinateType::from_flags(self.opt_z().is_some(), self.opt_m().is_some())
    }

    /// Copies the components into a [`Position`].
    fn to_position(&self) -> Position {
        Position::new(self.x(), self.y(), self.opt_z(), self.opt_m())
    }
}

/// An immutable position with `x`, `y` and optional `z` and `m` components.
///
/// Absent components are stored as `0.0`, so two positions with the same coordinate type compare equal exactly when
/// their present components are equal.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
    m: f64,
    coord_type: CoordinateType,
}

impl Position {
    /// Creates a 2d position.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            m: 0.0,
            coord_type: CoordinateType::XY,
        }
    }

    /// Creates a 3d position.
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            m: 0.0,
            coord_type: CoordinateType::XYZ,
        }
    }

    /// Creates a measured 2d position.
    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            m,
            coord_type: CoordinateType::XYM,
        }
    }

    /// Creates a measured 3d position.
    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z,
            m,
            coord_type: CoordinateType::XYZM,
        }
    }

    /// Creates a position whose coordinate type follows from the given optional components.
    pub fn new(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Self {
            x,
            y,
            z: z.unwrap_or(0.0),
            m: m.unwrap_or(0.0),
            coord_type: CoordinateType::from_flags(z.is_some(), m.is_some()),
        }
    }

    /// Creates a position from an array of 2, 3 or 4 values.
    ///
    /// Without an explicit `coord_type`, 3 values are read as `x, y, z` and 4 values as `x, y, z, m`. With one,
    /// the array length must match its dimension.
    pub fn from_values(
        values: &[f64],
        coord_type: Option<CoordinateType>,
    ) -> Result<Self, TypesError> {
        let coord_type = match coord_type {
            Some(coord_type) if coord_type.dimension() == values.len() => coord_type,
            Some(coord_type) => {
                return Err(TypesError::InvalidPositionLength {
                    expected: vec![coord_type.dimension()],
                    found: values.len(),
                })
            }
            None => match values.len() {
                2 => CoordinateType::XY,
                3 => CoordinateType::XYZ,
                4 => CoordinateType::XYZM,
                found => {
                    return Err(TypesError::InvalidPositionLength {
                        expected: vec![2, 3, 4],
                        found,
                    })
                }
            },
        };

        Ok(Self::from_chunk(values, coord_type))
    }

    /// Reads a position from a chunk that is known to have `coord_type.dimension()` values.
    pub(crate) fn from_chunk(chunk: &[f64], coord_type: CoordinateType) -> Self {
        let z = if coord_type.is_3d() { chunk[2] } else { 0.0 };
        let m = if coord_type.is_measured() {
            chunk[coord_type.dimension() - 1]
        } else {
            0.0
        };

        Self {
            x: chunk[0],
            y: chunk[1],
            z,
            m,
            coord_type,
        }
    }

    /// X component.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component, or `0.0` if the position is not 3d.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// M component, or `0.0` if the position is not measured.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Z component if the position is 3d.
    pub fn opt_z(&self) -> Option<f64> {
        self.coord_type.is_3d().then_some(self.z)
    }

    /// M component if the position is measured.
    pub fn opt_m(&self) -> Option<f64> {
        self.coord_type.is_measured().then_some(self.m)
    }

    /// Returns the same position with another coordinate type. Components missing in the source become `0.0`.
    pub fn with_coord_type(&self, coord_type: CoordinateType) -> Self {
        Self {
            z: if coord_type.is_3d() { self.z } else { 0.0 },
            m: if coord_type.is_measured() { self.m } else { 0.0 },
            coord_type,
            ..*self
        }
    }

    /// Appends the present components (`x, y, [z], [m]`) to `out`.
    pub fn write_values(&self, out: &mut Vec<f64>) {
        out.push(self.x);
        out.push(self.y);
        if self.coord_type.is_3d() {
            out.push(self.z);
        }
        if self.coord_type.is_measured() {
            out.push(self.m);
        }
    }

    /// Present components as a vector.
    pub fn values(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.coord_type.dimension());
        self.write_values(&mut values);
        values
    }
}

impl HasCoordinateType for Position {
    fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }
}

impl Coordinate for Position {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn opt_z(&self) -> Option<f64> {
        Position::opt_z(self)
    }

    fn opt_m(&self) -> Option<f64> {
        Position::opt_m(self)
    }

    fn coordinate_type(&self) -> CoordinateType {
        self.coord_type
    }

    fn to_position(&self) -> Position {
        *self
    }
}

impl AbsDiffEq for Position {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.coord_type == other.coord_type
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.m.abs_diff_eq(&other.m, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn optional_components() {
        let position = Position::xym(1.0, 2.0, 5.0);
        assert_eq!(position.opt_z(), None);
        assert_eq!(position.z(), 0.0);
        assert_eq!(position.opt_m(), Some(5.0));
        assert_eq!(position.values(), vec![1.0, 2.0, 5.0]);

        let position = Position::new(1.0, 2.0, Some(3.0), None);
        assert_eq!(position.coord_type(), CoordinateType::XYZ);
        assert_eq!(position.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_values() {
        assert_eq!(
            Position::from_values(&[1.0, 2.0, 3.0], None).unwrap(),
            Position::xyz(1.0, 2.0, 3.0)
        );
        assert_eq!(
            Position::from_values(&[1.0, 2.0, 3.0], Some(CoordinateType::XYM)).unwrap(),
            Position::xym(1.0, 2.0, 3.0)
        );
        assert_eq!(
            Position::from_values(&[1.0, 2.0, 3.0, 4.0], None).unwrap(),
            Position::xyzm(1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn from_values_rejects_bad_length() {
        assert_matches!(
            Position::from_values(&[1.0], None),
            Err(TypesError::InvalidPositionLength { found: 1, .. })
        );
        assert_matches!(
            Position::from_values(&[1.0, 2.0], Some(CoordinateType::XYZ)),
            Err(TypesError::InvalidPositionLength { found: 2, .. })
        );
    }

    #[test]
    fn with_coord_type_pads_and_drops() {
        let position = Position::xym(1.0, 2.0, 5.0);
        assert_eq!(
            position.with_coord_type(CoordinateType::XYZM),
            Position::xyzm(1.0, 2.0, 0.0, 5.0)
        );
        assert_eq!(
            position.with_coord_type(CoordinateType::XY),
            Position::xy(1.0, 2.0)
        );
    }
}
