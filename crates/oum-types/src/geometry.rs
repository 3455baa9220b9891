use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `(longitude, latitude)` pair in WGS84 degrees.
///
/// Serialized the GeoJSON way, as a two-element array `[lng, lat]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// The `(0, 0)` fallback used for malformed points.
    pub const fn origin() -> Self {
        Self { lng: 0.0, lat: 0.0 }
    }

    /// Extract a coordinate from a stored JSON position.
    ///
    /// Accepts any array whose first two entries are numbers; extra entries
    /// (elevation, measure) are ignored. Anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        let lng = items.first()?.as_f64()?;
        let lat = items.get(1)?.as_f64()?;
        Some(Self { lng, lat })
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lng, c.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// Typed geometry for features created in Rust.
///
/// Stored geometry is never required to match this shape; loaded documents
/// keep whatever JSON they were written with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Coordinate> },
    Point { coordinates: Coordinate },
}

impl Geometry {
    pub fn line_string(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        Self::LineString {
            coordinates: coordinates.into_iter().collect(),
        }
    }

    pub fn point(coordinate: Coordinate) -> Self {
        Self::Point {
            coordinates: coordinate,
        }
    }

    /// Convert into the JSON form stored in the document.
    pub fn to_json(&self) -> Value {
        let coordinates = match self {
            Self::LineString { coordinates } => Value::Array(
                coordinates
                    .iter()
                    .map(|c| serde_json::json!([c.lng, c.lat]))
                    .collect(),
            ),
            Self::Point { coordinates } => serde_json::json!([coordinates.lng, coordinates.lat]),
        };
        let kind = match self {
            Self::LineString { .. } => "LineString",
            Self::Point { .. } => "Point",
        };
        serde_json::json!({ "type": kind, "coordinates": coordinates })
    }
}
