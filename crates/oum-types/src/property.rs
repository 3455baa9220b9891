use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Well-known property keys written by the drawing tool.
pub mod keys {
    pub const NAME: &str = "name";
    pub const TOTAL_LANES: &str = "totalLanes";
    pub const LANES_FORWARD: &str = "lanesForward";
    pub const LANES_BACKWARD: &str = "lanesBackward";
    pub const ONE_WAY: &str = "oneWay";
    pub const ARROW_DIRECTION: &str = "arrowDirection";
    pub const BUS_LANE: &str = "busLane";
    pub const FEATURE_TYPE: &str = "featureType";
}

/// Line attributes exported as KML extended data, in output order.
pub const LINE_ATTRIBUTES: [&str; 6] = [
    keys::TOTAL_LANES,
    keys::LANES_FORWARD,
    keys::LANES_BACKWARD,
    keys::ONE_WAY,
    keys::ARROW_DIRECTION,
    keys::BUS_LANE,
];

/// A single property value.
///
/// Property bags are open: any key may appear and the drawing tool only ever
/// writes scalars. Nested arrays or objects are kept as [`Structured`] so
/// that nothing is lost on pass-through.
///
/// [`Structured`]: PropertyValue::Structured
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PropertyValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Structured(Value),
}

impl PropertyValue {
    pub fn from_json(value: &Value) -> Self {
        value.clone().into()
    }

    pub fn to_json(&self) -> Value {
        self.clone().into()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Truthiness as the drawing tool sees it: empty strings, zero, `false`,
    /// null and empty containers are all falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Self::Text(s) => !s.is_empty(),
            Self::Structured(Value::Array(items)) => !items.is_empty(),
            Self::Structured(Value::Object(map)) => !map.is_empty(),
            Self::Structured(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Structured(other),
        }
    }
}

impl From<PropertyValue> for Value {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Null => Value::Null,
            PropertyValue::Bool(b) => Value::Bool(b),
            PropertyValue::Number(n) => Value::Number(n),
            PropertyValue::Text(s) => Value::String(s),
            PropertyValue::Structured(v) => v,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u32> for PropertyValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for PropertyValue {
    /// Non-finite values have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Text form used in exports: null is empty, booleans are lowercase, numbers
/// keep their JSON spelling and structured values are compact JSON.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

/// An open property bag, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Map<String, Value>);

impl Properties {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Look up a key; absent keys read as [`PropertyValue::Null`].
    pub fn get(&self, key: &str) -> PropertyValue {
        self.0.get(key).map(PropertyValue::from_json).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into().into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PropertyValue)> + '_ {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), PropertyValue::from_json(v)))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Properties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
