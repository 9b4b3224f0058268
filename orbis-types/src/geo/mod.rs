//! Geographic helpers: datums, coordinate reference systems, projections and distances.
//!
//! Geographic positions use `x` for longitude and `y` for latitude, both in degrees.

mod crs;
mod datum;
pub mod distance;
#[cfg(feature = "geodesy")]
mod geodesy;
mod projection;
mod web_mercator;

pub use crs::{AxisOrder, Crs, ProjectionType};
pub use datum::Datum;
#[cfg(feature = "geodesy")]
pub use geodesy::GeodesyProjection;
pub use projection::Projection;
pub use web_mercator::WebMercator;
