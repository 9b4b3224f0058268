use std::fmt::Write;

use log::{debug, trace};
use orbis_types::geo::AxisOrder;
use orbis_types::{Bounds, CoordinateType, GeometryKind, HasCoordinateType};
use serde_json::{Map, Value};

use crate::dialect::{Coordinates, Dialect, GeometryHeader, Opening};
use crate::error::FormatError;
use crate::feature::{Feature, FeatureCollection};
use crate::number::NumberFormat;
use crate::options::GeoJsonOptions;
use crate::state::Container;
use crate::writer::TextWriter;

const GEOMETRY_MEMBER: &str = "geometry";
const PROPERTIES_MEMBER: &str = "properties";
const BBOX_MEMBER: &str = "bbox";

/// Members the writer produces itself. Custom members with these names are skipped.
const FEATURE_MEMBERS: &[&str] = &[
    "type",
    "id",
    BBOX_MEMBER,
    "crs",
    GEOMETRY_MEMBER,
    PROPERTIES_MEMBER,
];
const COLLECTION_MEMBERS: &[&str] = &["type", BBOX_MEMBER, "crs", "features"];

/// GeoJSON (RFC 7946) objects: geometries, features and feature collections.
///
/// Besides the geometry methods of [`TextWriter`], a GeoJSON writer can write whole [`Feature`]s and
/// [`FeatureCollection`]s, or stream them:
///
/// ```
/// use orbis_text::GeoJsonWriter;
/// use orbis_types::{Point, Position};
/// use serde_json::{json, Map};
///
/// let mut writer = GeoJsonWriter::default();
/// writer.begin_feature_collection(None, &Map::new()).unwrap();
///
/// writer.begin_feature(Some(&json!(1)), None).unwrap();
/// writer.point(&Point::new(Position::xy(1.0, 2.0))).unwrap();
/// writer.property("properties", &json!({"name": "a"})).unwrap();
/// writer.end_feature().unwrap();
///
/// // Geometries written straight into a collection are wrapped into features.
/// writer.point(&Point::new(Position::xy(3.0, 4.0))).unwrap();
///
/// writer.end_feature_collection().unwrap();
/// assert!(writer.is_complete());
/// assert_eq!(
///     writer.as_text(),
///     concat!(
///         r#"{"type":"FeatureCollection","features":["#,
///         r#"{"type":"Feature","id":1,"geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{"name":"a"}},"#,
///         r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[3.0,4.0]},"properties":{}}"#,
///         "]}"
///     )
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoJson {
    options: GeoJsonOptions,
}

impl GeoJson {
    /// Creates the dialect.
    pub fn new(options: GeoJsonOptions) -> Self {
        Self { options }
    }

    /// Options of the dialect.
    pub fn options(&self) -> &GeoJsonOptions {
        &self.options
    }

    fn bbox_dialect(&self) -> Coordinates {
        Coordinates::new(self.options.text.with_swap_xy(self.swap_xy()))
            .with_ignore_measured(self.options.ignore_measured)
    }
}

impl Dialect for GeoJson {
    const OPEN: char = '[';
    const CLOSE: char = ']';
    const COORD_SEPARATOR: char = ',';

    fn number_format(&self) -> NumberFormat {
        self.options.text.number_format()
    }

    fn swap_xy(&self) -> bool {
        self.options.text.swap_xy
            || self
                .options
                .crs
                .as_ref()
                .is_some_and(|crs| crs.axis_order() == AxisOrder::LatLon)
    }

    fn allows_measured(&self) -> bool {
        !self.options.ignore_measured
    }

    fn begin_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        header: &GeometryHeader<'_>,
    ) -> Result<Opening, FormatError> {
        let mut opening = Opening::Geometry;
        if writer.state().at_feature() {
            let name = header.name.unwrap_or(GEOMETRY_MEMBER);
            if name != GEOMETRY_MEMBER && writer.dialect.options.ignore_foreign_members {
                debug!("Skipping foreign geometry member {name:?}");
                return Ok(Opening::Skipped);
            }

            writer.separate()?;
            write_key(writer, name)?;
        } else if writer.state().at_feature_collection() {
            writer.separate()?;
            writer.write_str(r#"{"type":"Feature","geometry":"#)?;
            opening = Opening::WrappedGeometry;
        } else {
            writer.separate()?;
        }

        let at_root = !writer.state().not_at_root();
        write!(
            writer.sink_mut(),
            r#"{{"type":"{}""#,
            header.kind.geojson_name()
        )?;
        if at_root {
            write_crs(writer)?;
        }
        if let Some(bounds) = header.bounds {
            writer.write_str(r#","bbox":"#)?;
            write_bbox(writer, bounds)?;
        }

        writer.write_str(match header.kind {
            GeometryKind::GeometryCollection => r#","geometries":"#,
            _ => r#","coordinates":"#,
        })?;

        Ok(opening)
    }

    fn end_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        _header: &GeometryHeader<'_>,
        opening: Opening,
    ) -> Result<(), FormatError> {
        writer.write_char('}')?;
        if opening == Opening::WrappedGeometry {
            writer.write_str(r#","properties":{}}"#)?;
        }
        Ok(())
    }

    fn empty_geometry<W: Write>(
        writer: &mut TextWriter<W, Self>,
        kind: GeometryKind,
        coord_type: CoordinateType,
        name: Option<&str>,
    ) -> Result<(), FormatError> {
        if writer.state().at_feature() && name.unwrap_or(GEOMETRY_MEMBER) == GEOMETRY_MEMBER {
            writer.separate()?;
            return writer.write_str(r#""geometry":null"#);
        }

        let header = GeometryHeader::new(kind, coord_type).with_name(name);
        let opening = Self::begin_geometry(writer, &header)?;
        if opening == Opening::Skipped {
            return Ok(());
        }

        writer.write_str("[]")?;
        Self::end_geometry(writer, &header, opening)
    }

    /// Inside a feature the box becomes its `bbox` member. At the top level a bare array is written.
    fn bounds<W: Write>(
        writer: &mut TextWriter<W, Self>,
        bounds: &Bounds,
    ) -> Result<(), FormatError> {
        if writer.state().at_feature() {
            writer.separate()?;
            write_key(writer, BBOX_MEMBER)?;
        } else if writer.state().not_at_root() {
            return Err(FormatError::MisplacedBounds(writer.state().current()));
        } else {
            writer.separate()?;
        }

        write_bbox(writer, bounds)
    }
}

impl<W: Write> TextWriter<W, GeoJson> {
    /// Writes a feature.
    ///
    /// Inside a feature collection the feature is written as one of its features.
    pub fn feature(&mut self, feature: &Feature) -> Result<(), FormatError> {
        self.open_feature(feature.id(), feature.bounds())?;
        self.nested(Container::Feature, |writer| {
            writer.state_mut().mark_item();
            writer.feature_members(feature)
        })?;
        self.write_char('}')
    }

    /// Writes a feature collection.
    ///
    /// Inside another feature collection, the features are appended to the outer collection and the bounds and
    /// custom members of the inner one are dropped.
    pub fn feature_collection(&mut self, collection: &FeatureCollection) -> Result<(), FormatError> {
        if self.state().at_feature_collection() {
            debug!(
                "Flattening nested feature collection with {} features",
                collection.features().len()
            );
            for feature in collection.features() {
                self.feature(feature)?;
            }
            return Ok(());
        }

        self.open_feature_collection(collection.bounds())?;
        self.nested(Container::FeatureCollection, |writer| {
            writer.state_mut().mark_item();
            writer.collection_members(collection.custom())?;
            writer.nested(Container::ObjectArray, |writer| {
                for feature in collection.features() {
                    writer.feature(feature)?;
                }
                Ok(())
            })?;
            writer.write_char(']')
        })?;
        self.write_char('}')
    }

    /// Opens a feature. Geometries, properties and custom members written until [`Self::end_feature`] become
    /// members of the feature.
    ///
    /// A geometry written without a name becomes the `geometry` member.
    pub fn begin_feature(
        &mut self,
        id: Option<&Value>,
        bounds: Option<&Bounds>,
    ) -> Result<(), FormatError> {
        self.open_feature(id, bounds)?;
        self.state_mut().push(Container::Feature);
        self.state_mut().mark_item();
        Ok(())
    }

    /// Closes the feature opened by [`Self::begin_feature`].
    ///
    /// # Panics
    ///
    /// Panics if the innermost open object is not a feature.
    pub fn end_feature(&mut self) -> Result<(), FormatError> {
        self.state_mut().pop(Container::Feature);
        self.write_char('}')
    }

    /// Opens a feature collection. Features and geometries written until [`Self::end_feature_collection`] become
    /// its features.
    pub fn begin_feature_collection(
        &mut self,
        bounds: Option<&Bounds>,
        custom: &Map<String, Value>,
    ) -> Result<(), FormatError> {
        self.open_feature_collection(bounds)?;
        self.state_mut().push(Container::FeatureCollection);
        self.state_mut().mark_item();
        if let Err(err) = self.collection_members(custom) {
            self.state_mut().pop(Container::FeatureCollection);
            return Err(err);
        }

        self.state_mut().push(Container::ObjectArray);
        Ok(())
    }

    /// Closes the feature collection opened by [`Self::begin_feature_collection`].
    ///
    /// # Panics
    ///
    /// Panics if the innermost open object is not a feature collection.
    pub fn end_feature_collection(&mut self) -> Result<(), FormatError> {
        self.state_mut().pop(Container::ObjectArray);
        self.state_mut().pop(Container::FeatureCollection);
        self.write_str("]}")
    }

    /// Writes a named member with a JSON value into the innermost open object.
    ///
    /// Inside a feature, members other than `id` and `properties` are foreign and are dropped when
    /// [`GeoJsonOptions::ignore_foreign_members`] is set. So are all custom members of a feature collection.
    pub fn property(&mut self, name: &str, value: &Value) -> Result<(), FormatError> {
        if self.begin_member(name)? {
            self.value(value)?;
        }
        Ok(())
    }

    /// Same as [`Self::property`] for an object value.
    pub fn properties(
        &mut self,
        name: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), FormatError> {
        if self.begin_member(name)? {
            self.object(properties)?;
        }
        Ok(())
    }

    fn open_feature(
        &mut self,
        id: Option<&Value>,
        bounds: Option<&Bounds>,
    ) -> Result<(), FormatError> {
        self.separate()?;
        let at_root = !self.state().not_at_root();
        self.write_str(r#"{"type":"Feature""#)?;
        if at_root {
            write_crs(self)?;
        }
        if let Some(id) = id {
            self.write_str(r#","id":"#)?;
            self.value(id)?;
        }
        if let Some(bounds) = bounds {
            self.write_str(r#","bbox":"#)?;
            write_bbox(self, bounds)?;
        }

        Ok(())
    }

    fn feature_members(&mut self, feature: &Feature) -> Result<(), FormatError> {
        match feature.geometry() {
            Some(geometry) => self.geometry_named(geometry, Some(GEOMETRY_MEMBER))?,
            None => {
                self.separate()?;
                self.write_str(r#""geometry":null"#)?;
            }
        }

        for (name, geometry) in feature.foreign_geometries() {
            if FEATURE_MEMBERS.contains(&name.as_str()) {
                debug!("Skipping foreign geometry {name:?} that shadows a feature member");
                continue;
            }
            self.geometry_named(geometry, Some(name))?;
        }

        self.properties(PROPERTIES_MEMBER, feature.properties())?;
        for (name, value) in feature.custom() {
            if FEATURE_MEMBERS.contains(&name.as_str()) {
                debug!("Skipping custom member {name:?} that shadows a feature member");
                continue;
            }
            self.property(name, value)?;
        }

        Ok(())
    }

    fn open_feature_collection(&mut self, bounds: Option<&Bounds>) -> Result<(), FormatError> {
        self.separate()?;
        let at_root = !self.state().not_at_root();
        self.write_str(r#"{"type":"FeatureCollection""#)?;
        if at_root {
            write_crs(self)?;
        }
        if let Some(bounds) = bounds {
            self.write_str(r#","bbox":"#)?;
            write_bbox(self, bounds)?;
        }

        Ok(())
    }

    fn collection_members(&mut self, custom: &Map<String, Value>) -> Result<(), FormatError> {
        for (name, value) in custom {
            if COLLECTION_MEMBERS.contains(&name.as_str()) {
                debug!("Skipping custom member {name:?} that shadows a feature collection member");
                continue;
            }
            self.property(name, value)?;
        }
        self.write_str(r#","features":["#)
    }

    /// Writes the separator and the key of a member. Returns `false` if the member is dropped.
    fn begin_member(&mut self, name: &str) -> Result<bool, FormatError> {
        let container = self.state().current();
        if is_framing_member(container, name) {
            debug!("Skipping member {name:?} of {container:?} that the writer produces itself");
            return Ok(false);
        }
        if self.dialect.options.ignore_foreign_members && is_foreign_member(container, name) {
            debug!("Skipping foreign member {name:?} of {container:?}");
            return Ok(false);
        }

        self.separate()?;
        if matches!(
            container,
            Container::Feature | Container::FeatureCollection | Container::PropertyMap
        ) {
            write_key(self, name)?;
        }

        Ok(true)
    }

    fn value(&mut self, value: &Value) -> Result<(), FormatError> {
        match value {
            Value::Object(map) => self.object(map),
            Value::Array(items) => {
                self.write_char('[')?;
                self.nested(Container::PropertyArray, |writer| {
                    for item in items {
                        writer.separate()?;
                        writer.value(item)?;
                    }
                    Ok(())
                })?;
                self.write_char(']')
            }
            scalar => {
                let text = serde_json::to_string(scalar)?;
                self.write_str(&text)
            }
        }
    }

    fn object(&mut self, map: &Map<String, Value>) -> Result<(), FormatError> {
        self.write_char('{')?;
        self.nested(Container::PropertyMap, |writer| {
            for (name, value) in map {
                writer.separate()?;
                write_key(writer, name)?;
                writer.value(value)?;
            }
            Ok(())
        })?;
        self.write_char('}')
    }
}

/// `type`, `bbox` and `crs` are written when the object is opened, `features` when the collection members end.
fn is_framing_member(container: Container, name: &str) -> bool {
    match container {
        Container::Feature => matches!(name, "type" | BBOX_MEMBER | "crs"),
        Container::FeatureCollection => COLLECTION_MEMBERS.contains(&name),
        _ => false,
    }
}

fn is_foreign_member(container: Container, name: &str) -> bool {
    match container {
        Container::Feature => name != "id" && name != PROPERTIES_MEMBER,
        Container::FeatureCollection => true,
        _ => false,
    }
}

fn write_key<W: Write>(writer: &mut TextWriter<W, GeoJson>, name: &str) -> Result<(), FormatError> {
    let key = serde_json::to_string(name)?;
    writer.write_str(&key)?;
    writer.write_char(':')
}

fn write_crs<W: Write>(writer: &mut TextWriter<W, GeoJson>) -> Result<(), FormatError> {
    let id = match writer.dialect.options.announced_crs() {
        Some(crs) => serde_json::to_string(crs.id())?,
        None => return Ok(()),
    };

    write!(
        writer.sink_mut(),
        r#","crs":{{"type":"name","properties":{{"name":{id}}}}}"#
    )?;
    Ok(())
}

/// Writes the bounds as a flat array using a separate writer, so that the coordinate type pinned by the box does
/// not leak into the state of `writer`.
fn write_bbox<W: Write>(
    writer: &mut TextWriter<W, GeoJson>,
    bounds: &Bounds,
) -> Result<(), FormatError> {
    trace!("Writing {} bbox with a sub-writer", bounds.coord_type());
    let dialect = writer.dialect.bbox_dialect();
    writer.write_char('[')?;
    writer.with_sink(dialect).bounds(bounds)?;
    writer.write_char(']')
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use orbis_types::geo::Crs;
    use orbis_types::{Geometry, LineString, MultiLineString, Point, Position, PositionSeries};
    use serde_json::json;

    use super::*;
    use crate::writer::GeoJsonWriter;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn point() {
        init();
        let mut writer = GeoJsonWriter::default();
        writer.point(&Point::new(Position::xy(10.0, 20.0))).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"Point","coordinates":[10.0,20.0]}"#
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn empty_geometry_inside_and_outside_feature() {
        init();
        let mut writer = GeoJsonWriter::default();
        writer.empty_geometry(GeometryKind::LineString).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"LineString","coordinates":[]}"#
        );

        let mut writer = GeoJsonWriter::default();
        writer.begin_feature(None, None).unwrap();
        writer.empty_geometry(GeometryKind::LineString).unwrap();
        writer.end_feature().unwrap();
        assert_eq!(writer.as_text(), r#"{"type":"Feature","geometry":null}"#);
        assert!(writer.is_complete());
    }

    #[test]
    fn foreign_geometry_is_dropped() {
        init();
        let feature = Feature::new(Point::new(Position::xy(1.0, 2.0))).with_foreign_geometry(
            "center",
            Point::new(Position::xy(3.0, 4.0)).into(),
        );

        let mut writer = GeoJsonWriter::default();
        writer.feature(&feature).unwrap();
        assert_eq!(
            writer.as_text(),
            concat!(
                r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"#,
                r#""center":{"type":"Point","coordinates":[3.0,4.0]},"properties":{}}"#
            )
        );

        let mut writer = GeoJsonWriter::geojson(
            String::new(),
            GeoJsonOptions::default().with_ignore_foreign_members(true),
        );
        writer.feature(&feature).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{}}"#
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn bbox_member() {
        init();
        let line = LineString::new(PositionSeries::from_positions(&[
            Position::xyz(0.0, 0.0, 1.0),
            Position::xyz(2.0, 2.0, 3.0),
        ]));
        let bounds = Geometry::from(line.clone()).calculate_bounds().unwrap();
        let line = line.with_bounds(bounds);

        let mut writer = GeoJsonWriter::geojson(
            String::new(),
            GeoJsonOptions::default().with_text(crate::TextOptions::default()),
        );
        writer.line_string(&line).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"LineString","bbox":[0,0,1,2,2,3],"coordinates":[[0,0,1],[2,2,3]]}"#
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn nested_property_values() {
        init();
        let feature = Feature::default()
            .with_id("a")
            .with_property("name", "quote \" inside")
            .with_property("tags", json!(["x", {"deep": [1, null]}]));

        let mut writer = GeoJsonWriter::default();
        writer.feature(&feature).unwrap();
        assert_eq!(
            writer.as_text(),
            concat!(
                r#"{"type":"Feature","id":"a","geometry":null,"#,
                r#""properties":{"name":"quote \" inside","tags":["x",{"deep":[1,null]}]}}"#
            )
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn lat_lon_crs_swaps_axes() {
        init();
        let options = GeoJsonOptions::default()
            .with_crs(Some(Crs::EPSG4326))
            .with_print_non_default_crs(true);
        let mut writer = GeoJsonWriter::geojson(String::new(), options);
        writer.point(&Point::new(Position::xy(10.0, 20.0))).unwrap();
        assert_eq!(
            writer.as_text(),
            concat!(
                r#"{"type":"Point","crs":{"type":"name","properties":{"name":"EPSG:4326"}},"#,
                r#""coordinates":[20.0,10.0]}"#
            )
        );

        let mut writer = GeoJsonWriter::geojson(
            String::new(),
            GeoJsonOptions::default().with_crs(Some(Crs::EPSG3857)),
        );
        writer.point(&Point::new(Position::xy(10.0, 20.0))).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"Point","coordinates":[10.0,20.0]}"#
        );
    }

    #[test]
    fn bounds_inside_streamed_feature() {
        init();
        let mut writer = GeoJsonWriter::default();
        writer.begin_feature(None, None).unwrap();
        writer.point(&Point::new(Position::xy(1.0, 2.0))).unwrap();
        writer
            .bounds(&Bounds::new(Position::xy(0.0, 0.0), Position::xy(2.0, 3.0)))
            .unwrap();
        writer.end_feature().unwrap();
        assert_eq!(
            writer.as_text(),
            concat!(
                r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"#,
                r#""bbox":[0.0,0.0,2.0,3.0]}"#
            )
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn bounds_between_features_are_rejected() {
        init();
        let mut writer = GeoJsonWriter::default();
        writer.begin_feature_collection(None, &Map::new()).unwrap();
        let result = writer.bounds(&Bounds::new(Position::xy(0.0, 0.0), Position::xy(1.0, 1.0)));
        assert_matches!(
            result,
            Err(FormatError::MisplacedBounds(Container::ObjectArray))
        );
        writer.end_feature_collection().unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"FeatureCollection","features":[]}"#
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn members_shadowing_standard_ones_are_skipped() {
        init();
        let feature = Feature::new(Point::new(Position::xy(1.0, 2.0)))
            .with_custom("type", "Bogus")
            .with_custom("geometry", Value::Null)
            .with_custom("title", "x")
            .with_foreign_geometry("properties", Point::new(Position::xy(3.0, 4.0)).into());

        let mut writer = GeoJsonWriter::default();
        writer.feature(&feature).unwrap();
        assert_eq!(
            writer.as_text(),
            concat!(
                r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"#,
                r#""properties":{},"title":"x"}"#
            )
        );

        let collection = FeatureCollection::new(vec![])
            .with_custom("features", json!([1]))
            .with_custom("name", "x");
        let mut writer = GeoJsonWriter::default();
        writer.feature_collection(&collection).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"FeatureCollection","name":"x","features":[]}"#
        );

        let mut writer = GeoJsonWriter::default();
        writer.begin_feature(None, None).unwrap();
        writer.property("type", &json!("Bogus")).unwrap();
        writer.property("properties", &json!({})).unwrap();
        writer.end_feature().unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"Feature","properties":{}}"#
        );
        assert!(writer.is_complete());
    }

    #[test]
    fn empty_member_line_string() {
        init();
        let multi_line_string = MultiLineString::new(vec![
            PositionSeries::default(),
            PositionSeries::from_positions(&[Position::xy(1.0, 2.0), Position::xy(3.0, 4.0)]),
        ]);

        let mut writer = GeoJsonWriter::default();
        writer.multi_line_string(&multi_line_string).unwrap();
        assert_eq!(
            writer.as_text(),
            r#"{"type":"MultiLineString","coordinates":[[],[[1.0,2.0],[3.0,4.0]]]}"#
        );
        assert!(writer.is_complete());
    }
}
