//! Running min/max accumulation of [`Bounds`].

use crate::bounds::Bounds;
use crate::coord_type::{CoordinateType, HasCoordinateType};
use crate::geometry::Geometry;
use crate::position::{Coordinate, Position};
use crate::series::PositionSeries;

/// Accumulates positions into a bounding box of the given target [`CoordinateType`].
///
/// `NaN` values are treated as absent: they never replace a running value, and any real value replaces a running
/// `NaN`.
///
/// ```
/// use orbis_types::{Bounds, BoundsBuilder, CoordinateType};
///
/// let mut builder = BoundsBuilder::new(CoordinateType::XY);
/// builder.add_point(1.0, 2.0, None, None);
/// builder.add_point(f64::NAN, 5.0, None, None);
/// builder.add_point(3.0, f64::NAN, None, None);
///
/// assert_eq!(builder.result(), Some(Bounds::xy(1.0, 2.0, 3.0, 5.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsBuilder {
    coord_type: CoordinateType,
    min: [f64; 4],
    max: [f64; 4],
}

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;
const M: usize = 3;

impl BoundsBuilder {
    /// Creates an empty builder.
    pub fn new(coord_type: CoordinateType) -> Self {
        Self {
            coord_type,
            min: [f64::NAN; 4],
            max: [f64::NAN; 4],
        }
    }

    /// Adds a single point. Missing `z` and `m` values count as `0.0` when the target type requires them.
    pub fn add_point(&mut self, x: f64, y: f64, z: Option<f64>, m: Option<f64>) {
        self.update(X, x);
        self.update(Y, y);

        if self.coord_type.is_3d() {
            self.update(Z, z.unwrap_or(0.0));
        }
        if self.coord_type.is_measured() {
            self.update(M, m.unwrap_or(0.0));
        }
    }

    /// Adds a position.
    pub fn add_position(&mut self, position: &impl Coordinate) {
        self.add_point(position.x(), position.y(), position.opt_z(), position.opt_m());
    }

    /// Adds all positions of the series.
    pub fn add_series(&mut self, series: &PositionSeries) {
        for position in series.iter() {
            self.add_position(&position);
        }
    }

    /// Adds both corners of the box.
    pub fn add_bounds(&mut self, bounds: &Bounds) {
        self.add_position(bounds.min());
        self.add_position(bounds.max());
    }

    /// Adds all positions of the geometry.
    pub fn add_geometry(&mut self, geometry: &Geometry) {
        match geometry {
            Geometry::Point(point) => self.add_position(point.position()),
            Geometry::LineString(line) => self.add_series(line.chain()),
            Geometry::Polygon(polygon) => polygon
                .rings()
                .iter()
                .for_each(|ring| self.add_series(ring)),
            Geometry::MultiPoint(points) => self.add_series(points.points()),
            Geometry::MultiLineString(lines) => lines
                .chains()
                .iter()
                .for_each(|chain| self.add_series(chain)),
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons.polygons() {
                    polygon
                        .rings()
                        .iter()
                        .for_each(|ring| self.add_series(ring));
                }
            }
            Geometry::GeometryCollection(collection) => collection
                .geometries()
                .iter()
                .for_each(|geometry| self.add_geometry(geometry)),
        }
    }

    /// Returns the accumulated box, or `None` if no real `x` and `y` values were added.
    pub fn result(&self) -> Option<Bounds> {
        if self.min[X].is_nan()
            || self.min[Y].is_nan()
            || self.max[X].is_nan()
            || self.max[Y].is_nan()
        {
            return None;
        }

        let corner = |values: &[f64; 4]| {
            Position::new(
                values[X],
                values[Y],
                self.coord_type.is_3d().then_some(values[Z]),
                self.coord_type.is_measured().then_some(values[M]),
            )
        };

        Some(Bounds::new(corner(&self.min), corner(&self.max)))
    }

    fn update(&mut self, index: usize, value: f64) {
        if value.is_nan() {
            return;
        }

        let min = &mut self.min[index];
        if min.is_nan() || value < *min {
            *min = value;
        }

        let max = &mut self.max[index];
        if max.is_nan() || value > *max {
            *max = value;
        }
    }
}

impl HasCoordinateType for BoundsBuilder {
    fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_has_no_result() {
        let builder = BoundsBuilder::new(CoordinateType::XYZ);
        assert_eq!(builder.result(), None);
    }

    #[test]
    fn nan_never_wins() {
        let mut builder = BoundsBuilder::new(CoordinateType::XY);
        builder.add_point(f64::NAN, f64::NAN, None, None);
        assert_eq!(builder.result(), None);

        builder.add_point(1.0, 2.0, None, None);
        builder.add_point(f64::NAN, 5.0, None, None);
        builder.add_point(3.0, f64::NAN, None, None);
        assert_eq!(builder.result(), Some(Bounds::xy(1.0, 2.0, 3.0, 5.0)));
    }

    #[test]
    fn only_x_is_not_enough() {
        let mut builder = BoundsBuilder::new(CoordinateType::XY);
        builder.add_point(1.0, f64::NAN, None, None);
        assert_eq!(builder.result(), None);
    }

    #[test]
    fn missing_z_and_m_count_as_zero() {
        let mut builder = BoundsBuilder::new(CoordinateType::XYZM);
        builder.add_point(1.0, 1.0, Some(5.0), None);
        builder.add_point(2.0, 3.0, None, Some(-4.0));

        let bounds = builder.result().unwrap();
        assert_eq!(bounds.coord_type(), CoordinateType::XYZM);
        assert_eq!(
            bounds.values(),
            vec![1.0, 1.0, 0.0, -4.0, 2.0, 3.0, 5.0, 0.0]
        );
    }

    #[test]
    fn target_type_controls_arity() {
        let mut builder = BoundsBuilder::new(CoordinateType::XYM);
        builder.add_position(&Position::xyzm(1.0, 2.0, 3.0, 4.0));
        builder.add_bounds(&Bounds::new(
            Position::xyzm(0.0, 0.0, 0.0, 0.0),
            Position::xyzm(5.0, 5.0, 5.0, 5.0),
        ));

        assert_eq!(
            builder.result().unwrap().values(),
            vec![0.0, 0.0, 0.0, 5.0, 5.0, 5.0]
        );
    }
}
