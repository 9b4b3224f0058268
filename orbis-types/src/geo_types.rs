use ::geo_types::{
    Coord, Geometry as GeoGeometry, GeometryCollection as GeoGeometryCollection,
    LineString as GeoLineString, MultiLineString as GeoMultiLineString,
    MultiPoint as GeoMultiPoint, MultiPolygon as GeoMultiPolygon, Point as GeoPoint,
    Polygon as GeoPolygon,
};

use crate::coord_type::CoordinateType;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::position::{Coordinate, Position};
use crate::series::PositionSeries;

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn opt_z(&self) -> Option<f64> {
        None
    }

    fn opt_m(&self) -> Option<f64> {
        None
    }
}

impl Coordinate for GeoPoint<f64> {
    fn x(&self) -> f64 {
        self.0.x
    }

    fn y(&self) -> f64 {
        self.0.y
    }

    fn opt_z(&self) -> Option<f64> {
        None
    }

    fn opt_m(&self) -> Option<f64> {
        None
    }
}

fn series<'a, C: Coordinate + 'a>(coords: impl IntoIterator<Item = &'a C>) -> PositionSeries {
    let mut series = PositionSeries::new(CoordinateType::XY);
    for coord in coords {
        series.push(coord);
    }

    series
}

impl From<GeoPoint<f64>> for Point {
    fn from(value: GeoPoint<f64>) -> Self {
        Point::new(Position::xy(value.x(), value.y()))
    }
}

impl From<GeoLineString<f64>> for LineString {
    fn from(value: GeoLineString<f64>) -> Self {
        LineString::new(series(&value.0))
    }
}

impl From<GeoPolygon<f64>> for Polygon {
    fn from(value: GeoPolygon<f64>) -> Self {
        let (exterior, interiors) = value.into_inner();
        let rings = std::iter::once(&exterior)
            .chain(interiors.iter())
            .map(|ring| series(&ring.0))
            .collect();
        Polygon::new(rings)
    }
}

impl From<GeoMultiPoint<f64>> for MultiPoint {
    fn from(value: GeoMultiPoint<f64>) -> Self {
        MultiPoint::new(series(&value.0))
    }
}

impl From<GeoMultiLineString<f64>> for MultiLineString {
    fn from(value: GeoMultiLineString<f64>) -> Self {
        MultiLineString::new(value.0.iter().map(|line| series(&line.0)).collect())
    }
}

impl From<GeoMultiPolygon<f64>> for MultiPolygon {
    fn from(value: GeoMultiPolygon<f64>) -> Self {
        MultiPolygon::new(value.0.into_iter().map(Polygon::from).collect())
    }
}

impl From<GeoGeometryCollection<f64>> for GeometryCollection {
    fn from(value: GeoGeometryCollection<f64>) -> Self {
        GeometryCollection::new(value.0.into_iter().map(Geometry::from).collect())
    }
}

impl From<GeoGeometry<f64>> for Geometry {
    fn from(value: GeoGeometry<f64>) -> Self {
        match value {
            GeoGeometry::Point(v) => Point::from(v).into(),
            GeoGeometry::Line(v) => LineString::new(series(&[v.start, v.end])).into(),
            GeoGeometry::LineString(v) => LineString::from(v).into(),
            GeoGeometry::Polygon(v) => Polygon::from(v).into(),
            GeoGeometry::MultiPoint(v) => MultiPoint::from(v).into(),
            GeoGeometry::MultiLineString(v) => MultiLineString::from(v).into(),
            GeoGeometry::MultiPolygon(v) => MultiPolygon::from(v).into(),
            GeoGeometry::GeometryCollection(v) => GeometryCollection::from(v).into(),
            GeoGeometry::Rect(v) => Polygon::from(v.to_polygon()).into(),
            GeoGeometry::Triangle(v) => Polygon::from(v.to_polygon()).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ::geo_types::{coord, line_string, point, polygon, Rect};

    use super::*;
    use crate::coord_type::HasCoordinateType;
    use crate::geometry::GeometryKind;

    #[test]
    fn point_and_line() {
        let point: Point = point!(x: 1.0, y: 2.0).into();
        assert_eq!(point.position(), &Position::xy(1.0, 2.0));

        let line: LineString = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into();
        assert_eq!(line.chain().values(), &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(line.coord_type(), CoordinateType::XY);
    }

    #[test]
    fn polygon_with_hole() {
        let polygon: Polygon = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]]
        )
        .into();

        assert_eq!(polygon.rings().len(), 2);
        assert!(polygon.rings().iter().all(PositionSeries::is_closed));
    }

    #[test]
    fn rect_becomes_polygon() {
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 3.0 });
        let geometry = Geometry::from(GeoGeometry::Rect(rect));
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert_eq!(
            geometry.calculate_bounds(),
            Some(crate::Bounds::xy(0.0, 0.0, 2.0, 3.0))
        );
    }
}
