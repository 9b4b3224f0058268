//! GeoJSON features and feature collections.

use orbis_types::{Bounds, Geometry};
use serde_json::{Map, Value};

/// A GeoJSON feature to be written by a [`GeoJsonWriter`](crate::GeoJsonWriter).
///
/// Besides the standard members, a feature can carry additional named geometries and custom members. Both are
/// foreign members in GeoJSON terms and are dropped when
/// [`ignore_foreign_members`](crate::GeoJsonOptions::ignore_foreign_members) is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    id: Option<Value>,
    geometry: Option<Geometry>,
    foreign_geometries: Vec<(String, Geometry)>,
    properties: Map<String, Value>,
    bounds: Option<Bounds>,
    custom: Map<String, Value>,
}

impl Feature {
    /// Creates a feature with the given main geometry.
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            ..Default::default()
        }
    }

    /// Sets the identifier. GeoJSON allows strings and numbers.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the main geometry. `None` is written as `"geometry":null`.
    pub fn with_geometry(mut self, geometry: Option<Geometry>) -> Self {
        self.geometry = geometry;
        self
    }

    /// Adds a named geometry besides the main one.
    pub fn with_foreign_geometry(mut self, name: impl Into<String>, geometry: Geometry) -> Self {
        self.foreign_geometries.push((name.into(), geometry));
        self
    }

    /// Sets a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Replaces all properties.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets a custom top level member.
    pub fn with_custom(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// Identifier.
    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// Main geometry.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Named geometries besides the main one.
    pub fn foreign_geometries(&self) -> &[(String, Geometry)] {
        &self.foreign_geometries
    }

    /// Properties.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Custom top level members.
    pub fn custom(&self) -> &Map<String, Value> {
        &self.custom
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    bounds: Option<Bounds>,
    custom: Map<String, Value>,
}

impl FeatureCollection {
    /// Creates a collection of the given features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            ..Default::default()
        }
    }

    /// Adds a feature.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Sets the bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets a custom top level member.
    pub fn with_custom(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// Features.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Bounding box.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Custom top level members.
    pub fn custom(&self) -> &Map<String, Value> {
        &self.custom
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
