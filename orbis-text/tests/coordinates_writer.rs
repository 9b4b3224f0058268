use assert_matches::assert_matches;
use orbis_text::{Coordinates, CoordinatesWriter, FormatError, TextOptions, TextWriter};
use orbis_types::{
    Bounds, CoordinateType, Geometry, GeometryCollection, GeometryKind, LineString, MultiPolygon,
    Point, Polygon, Position, PositionSeries,
};

fn text(geometry: &Geometry) -> String {
    let mut writer = CoordinatesWriter::default();
    writer.geometry(geometry).unwrap();
    assert!(writer.is_complete());
    writer.into_text()
}

fn square(origin: f64) -> Polygon {
    Polygon::new(vec![PositionSeries::from_positions(&[
        Position::xy(origin, origin),
        Position::xy(origin + 1.0, origin),
        Position::xy(origin + 1.0, origin + 1.0),
        Position::xy(origin, origin),
    ])])
}

#[test]
fn nesting_levels() {
    assert_eq!(text(&Point::new(Position::xy(10.0, 20.0)).into()), "10,20");
    assert_eq!(
        text(&square(0.0).into()),
        "[[0,0],[1,0],[1,1],[0,0]]"
    );
    assert_eq!(
        text(&MultiPolygon::new(vec![square(0.0), square(5.0)]).into()),
        "[[[0,0],[1,0],[1,1],[0,0]]],[[[5,5],[6,5],[6,6],[5,5]]]"
    );
}

#[test]
fn collection_with_empty_members() {
    let collection = GeometryCollection::new(vec![
        Point::new(Position::xy(1.0, 2.0)).into(),
        LineString::new(PositionSeries::new(CoordinateType::XY)).into(),
        GeometryCollection::new(vec![Point::new(Position::xy(3.0, 4.0)).into()]).into(),
    ]);
    assert_eq!(text(&collection.into()), "[1,2],[],[[3,4]]");
}

#[test]
fn measured_values() {
    let point = Point::new(Position::xyzm(1.0, 2.0, 3.0, 4.0));
    assert_eq!(text(&point.into()), "1,2,3,4");

    let mut writer = TextWriter::new(String::new(), Coordinates::default().with_ignore_measured(true));
    writer.point(&point).unwrap();
    assert_eq!(writer.as_text(), "1,2,3");

    let mut writer = CoordinatesWriter::default();
    writer.emit_point(1.0, 2.0, None, Some(5.0)).unwrap();
    assert_eq!(writer.as_text(), "1,2,0,5");
}

#[test]
fn options() {
    let point = Point::new(Position::xy(10.0, 20.5));

    let mut writer = CoordinatesWriter::coordinates(
        String::new(),
        TextOptions::default().with_swap_xy(true),
    );
    writer.point(&point).unwrap();
    assert_eq!(writer.as_text(), "20.5,10");

    let mut writer =
        CoordinatesWriter::coordinates(String::new(), TextOptions::default().with_compact(false));
    writer.point(&point).unwrap();
    assert_eq!(writer.as_text(), "10.0,20.5");
}

#[test]
fn bounds_and_positions() {
    let mut writer = CoordinatesWriter::default();
    writer.bounds(&Bounds::xy(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert_eq!(writer.as_text(), "0,0,2,2");

    let mut writer = CoordinatesWriter::default();
    writer.position(&Position::xym(1.0, 2.0, 3.0)).unwrap();
    assert_eq!(writer.as_text(), "1,2,3");
}

#[test]
fn flat_buffers() {
    let mut writer = CoordinatesWriter::default();
    writer
        .series_values(
            GeometryKind::MultiPoint,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            CoordinateType::XYZ,
        )
        .unwrap();
    assert_eq!(writer.as_text(), "[1,2,3],[4,5,6]");

    let mut writer = CoordinatesWriter::default();
    assert_matches!(
        writer.series_values(GeometryKind::Polygon, &[1.0, 2.0], CoordinateType::XY),
        Err(FormatError::UnsupportedKind(GeometryKind::Polygon))
    );
    assert_eq!(writer.as_text(), "");
    assert!(writer.is_complete());
}
