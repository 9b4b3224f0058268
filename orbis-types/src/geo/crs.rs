use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::geo::datum::Datum;
use crate::geo::projection::Projection;
use crate::geo::web_mercator::WebMercator;

/// Order of the horizontal axes as defined by a coordinate reference system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Longitude (easting) first.
    #[default]
    LonLat,
    /// Latitude (northing) first.
    LatLon,
}

/// Projection a coordinate reference system uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProjectionType {
    /// Geographic coordinates, no projection.
    None,
    /// Spherical Web Mercator.
    WebMercator,
    /// Projection given by a PROJ-style definition string.
    Other(String),
}

/// Coordinate reference system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    id: Cow<'static, str>,
    axis_order: AxisOrder,
    datum: Datum,
    projection_type: ProjectionType,
}

impl Crs {
    /// WGS84 geographic coordinates in longitude, latitude order. This is the GeoJSON default.
    pub const CRS84: Crs = Crs {
        id: Cow::Borrowed("urn:ogc:def:crs:OGC:1.3:CRS84"),
        axis_order: AxisOrder::LonLat,
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// WGS84 geographic coordinates in latitude, longitude order.
    pub const EPSG4326: Crs = Crs {
        id: Cow::Borrowed("EPSG:4326"),
        axis_order: AxisOrder::LatLon,
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// Web Mercator.
    pub const EPSG3857: Crs = Crs {
        id: Cow::Borrowed("EPSG:3857"),
        axis_order: AxisOrder::LonLat,
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
    };

    /// Creates a new CRS.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        axis_order: AxisOrder,
        datum: Datum,
        projection_type: ProjectionType,
    ) -> Self {
        Self {
            id: id.into(),
            axis_order,
            datum,
            projection_type,
        }
    }

    /// Identifier, e.g. `EPSG:3857`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Axis order.
    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    /// Datum.
    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    /// Projection type.
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }

    /// Whether this is the CRS GeoJSON assumes when none is given.
    pub fn is_geojson_default(&self) -> bool {
        self.id == Self::CRS84.id
    }

    /// Returns the projection from geographic coordinates to this CRS, if one is available.
    ///
    /// Geographic systems get no projection. [`ProjectionType::Other`] definitions need the `geodesy` feature.
    pub fn get_projection(&self) -> Option<Box<dyn Projection>> {
        match &self.projection_type {
            ProjectionType::None => None,
            ProjectionType::WebMercator => Some(Box::new(WebMercator::new(self.datum))),
            #[cfg(feature = "geodesy")]
            ProjectionType::Other(definition) => {
                crate::geo::geodesy::GeodesyProjection::new(definition)
                    .ok()
                    .map(|projection| Box::new(projection) as Box<dyn Projection>)
            }
            #[cfg(not(feature = "geodesy"))]
            ProjectionType::Other(_) => None,
        }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::CRS84
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::Position;

    #[test]
    fn geojson_default() {
        assert!(Crs::CRS84.is_geojson_default());
        assert!(Crs::default().is_geojson_default());
        assert!(!Crs::EPSG4326.is_geojson_default());
        assert_eq!(Crs::EPSG4326.axis_order(), AxisOrder::LatLon);
    }

    #[test]
    fn projection_by_type() {
        assert!(Crs::CRS84.get_projection().is_none());

        let projection = Crs::EPSG3857.get_projection().unwrap();
        let projected = projection.project(&Position::xy(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(projected, Position::xy(0.0, 0.0), epsilon = 1e-6);
    }
}
