//! Distances between geographic positions (`x` = longitude, `y` = latitude, degrees).

use crate::geo::datum::Datum;
use crate::position::Position;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// Great circle distance on a sphere of the given radius, using the haversine formula.
pub fn haversine_distance(a: &Position, b: &Position, radius: f64) -> f64 {
    let lat_a = a.y().to_radians();
    let lat_b = b.y().to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * radius * h.sqrt().asin()
}

/// Geodesic distance in meters on the ellipsoid of the datum, using the inverse Vincenty formula.
///
/// Returns `None` if the iteration does not converge, which happens for nearly antipodal points.
pub fn vincenty_distance(a: &Position, b: &Position, datum: &Datum) -> Option<f64> {
    let semimajor = datum.semimajor();
    let semiminor = datum.semiminor();
    let f = datum.flattening();

    let l = (b.x() - a.x()).to_radians();
    let u1 = ((1.0 - f) * a.y().to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.y().to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Some(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Both points on the equator.
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            let u_sq = cos_sq_alpha * (semimajor.powi(2) - semiminor.powi(2)) / semiminor.powi(2);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

            return Some(semiminor * big_a * (sigma - delta_sigma));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn haversine_berlin_paris() {
        let berlin = Position::xy(13.405, 52.52);
        let paris = Position::xy(2.3522, 48.8566);
        let distance = haversine_distance(&berlin, &paris, EARTH_RADIUS_M);
        assert_abs_diff_eq!(distance, 878_000.0, epsilon = 5_000.0);
        assert_eq!(haversine_distance(&berlin, &berlin, EARTH_RADIUS_M), 0.0);
    }

    #[test]
    fn vincenty_flinders_peak_buninyong() {
        let flinders_peak = Position::xy(144.42486789, -37.95103342);
        let buninyong = Position::xy(143.92649553, -37.65282114);
        let distance = vincenty_distance(&flinders_peak, &buninyong, &Datum::WGS84).unwrap();
        assert_abs_diff_eq!(distance, 54_972.271, epsilon = 0.05);
    }

    #[test]
    fn vincenty_coincident_points() {
        let point = Position::xy(10.0, 20.0);
        assert_eq!(vincenty_distance(&point, &point, &Datum::WGS84), Some(0.0));
    }

    #[test]
    fn vincenty_antipodal_points_do_not_converge() {
        let a = Position::xy(0.0, 0.0);
        let b = Position::xy(179.7, 0.5);
        assert_eq!(vincenty_distance(&a, &b, &Datum::WGS84), None);
    }
}
