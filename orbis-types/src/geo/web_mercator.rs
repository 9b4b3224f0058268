use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::geo::datum::Datum;
use crate::geo::projection::{replace_xy, Projection};
use crate::position::Position;

/// Spherical Web Mercator projection (EPSG:3857) on the semimajor axis of the datum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a projection for the given datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl Projection for WebMercator {
    fn project(&self, input: &Position) -> Option<Position> {
        let radius = self.datum.semimajor();
        let x = radius * input.x().to_radians();
        let y = radius * (FRAC_PI_4 + input.y().to_radians() / 2.0).tan().ln();

        replace_xy(input, x, y)
    }

    fn unproject(&self, input: &Position) -> Option<Position> {
        let radius = self.datum.semimajor();
        let lat = FRAC_PI_2 - 2.0 * (-input.y() / radius).exp().atan();
        let lon = input.x() / radius;

        replace_xy(input, lon.to_degrees(), lat.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn project_known_point() {
        let projection = WebMercator::default();
        let projected = projection.project(&Position::xy(10.0, 45.0)).unwrap();
        assert_abs_diff_eq!(projected.x(), 1_113_194.907, epsilon = 1e-3);
        assert_abs_diff_eq!(projected.y(), 5_621_521.486, epsilon = 1e-3);
    }

    #[test]
    fn round_trip_keeps_z_and_m() {
        let projection = WebMercator::default();
        let position = Position::xyzm(-71.06, 42.36, 12.0, 3.0);
        let projected = projection.project(&position).unwrap();
        assert_eq!(projected.opt_z(), Some(12.0));
        assert_eq!(projected.opt_m(), Some(3.0));

        let back = projection.unproject(&projected).unwrap();
        assert_abs_diff_eq!(back, position, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_results_are_rejected() {
        let projection = WebMercator::default();
        assert!(projection.project(&Position::xy(f64::NAN, 0.0)).is_none());
        assert!(projection.project(&Position::xy(0.0, 120.0)).is_none());
    }
}
