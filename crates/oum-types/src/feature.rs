use serde_json::{Map, Value};

use crate::geometry::{Coordinate, Geometry};
use crate::property::{keys, Properties, PropertyValue};

const GEOMETRY: &str = "geometry";
const COORDINATES: &str = "coordinates";
const PROPERTIES: &str = "properties";
const VISIBLE: &str = "visible";

/// Borrowed view over one stored road line.
///
/// Stored lines are never validated, so every accessor is lenient: a missing
/// or malformed field reads as its empty default instead of failing.
#[derive(Clone, Copy, Debug)]
pub struct LineFeature<'a> {
    raw: &'a Value,
}

impl<'a> LineFeature<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    /// The stored JSON for this line, exactly as persisted.
    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// The stored geometry object, if any.
    pub fn geometry(&self) -> Option<&'a Value> {
        self.raw.get(GEOMETRY)
    }

    /// Positions of the LineString, in stored order.
    ///
    /// Entries that are not numeric pairs are skipped.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.geometry()
            .and_then(|g| g.get(COORDINATES))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Coordinate::from_json).collect())
            .unwrap_or_default()
    }

    /// The raw property bag, when it is an object.
    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.raw.get(PROPERTIES).and_then(Value::as_object)
    }

    /// Read one property; absent keys are [`PropertyValue::Null`].
    pub fn property(&self, key: &str) -> PropertyValue {
        self.properties()
            .and_then(|props| props.get(key))
            .map(PropertyValue::from_json)
            .unwrap_or_default()
    }

    pub fn name(&self) -> PropertyValue {
        self.property(keys::NAME)
    }

    /// The stored `visible` value as written, or `true` when the key is
    /// absent.
    pub fn visible_value(&self) -> PropertyValue {
        self.raw
            .get(VISIBLE)
            .map(PropertyValue::from_json)
            .unwrap_or(PropertyValue::Bool(true))
    }

    /// Visibility flag; anything other than an explicit boolean reads as
    /// visible.
    pub fn visible(&self) -> bool {
        self.raw
            .get(VISIBLE)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}

/// Borrowed view over one stored traffic light.
#[derive(Clone, Copy, Debug)]
pub struct TrafficLight<'a> {
    raw: &'a Value,
}

impl<'a> TrafficLight<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn geometry(&self) -> Option<&'a Value> {
        self.raw.get(GEOMETRY)
    }

    /// Point position, falling back to `(0, 0)` when missing or malformed.
    pub fn position(&self) -> Coordinate {
        self.geometry()
            .and_then(|g| g.get(COORDINATES))
            .and_then(Coordinate::from_json)
            .unwrap_or_else(Coordinate::origin)
    }
}

/// A line built in Rust, ready to be appended to a [`Document`].
///
/// [`Document`]: crate::Document
#[derive(Clone, Debug, PartialEq)]
pub struct NewLine {
    pub coordinates: Vec<Coordinate>,
    pub properties: Properties,
    pub visible: bool,
}

impl NewLine {
    pub fn new(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            coordinates: coordinates.into_iter().collect(),
            properties: Properties::new(),
            visible: true,
        }
    }

    /// A line carrying the attribute defaults the drawing tool writes for a
    /// freshly drawn road.
    pub fn drawn(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        let properties = Properties::new()
            .with(keys::NAME, "")
            .with(keys::TOTAL_LANES, PropertyValue::Null)
            .with(keys::LANES_FORWARD, PropertyValue::Null)
            .with(keys::LANES_BACKWARD, PropertyValue::Null)
            .with(keys::ONE_WAY, false)
            .with(keys::ARROW_DIRECTION, 1i64)
            .with(keys::BUS_LANE, "none");
        Self {
            properties,
            ..Self::new(coordinates)
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn into_json(self) -> Value {
        let mut map = Map::new();
        map.insert(
            GEOMETRY.into(),
            Geometry::line_string(self.coordinates).to_json(),
        );
        map.insert(VISIBLE.into(), Value::Bool(self.visible));
        map.insert(PROPERTIES.into(), Value::Object(self.properties.into_map()));
        Value::Object(map)
    }
}

/// JSON form of a traffic light at `position`.
pub(crate) fn traffic_light_json(position: Coordinate) -> Value {
    let mut map = Map::new();
    map.insert(GEOMETRY.into(), Geometry::point(position).to_json());
    map.insert(VISIBLE.into(), Value::Bool(true));
    Value::Object(map)
}
