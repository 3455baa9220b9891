//! GeoJSON `FeatureCollection` export.
//!
//! Geometry is copied as stored, without validation. Lines keep their whole
//! property bag plus a `featureType` discriminator; traffic lights carry the
//! discriminator only and lose any other stored fields. The asymmetry
//! matches what the drawing tool edits: lights have no attributes.

use oum_types::{keys, Document, LineFeature, TrafficLight};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ExportError, ExportResult};

pub const FEATURE_TYPE_LINE: &str = "line";
pub const FEATURE_TYPE_TRAFFIC_LIGHT: &str = "trafficLight";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Value,
    pub properties: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Build the collection: lines first, then traffic lights.
    pub fn from_document(document: &Document) -> Self {
        let features: Vec<Feature> = document
            .lines()
            .map(line_feature)
            .chain(document.traffic_lights().map(traffic_light_feature))
            .collect();
        debug!(features = features.len(), "built GeoJSON feature collection");
        Self { features }
    }

    pub fn to_value(&self) -> ExportResult<Value> {
        serde_json::to_value(self).map_err(|e| ExportError::Serialization(e.to_string()))
    }
}

/// Convert a document straight into its GeoJSON value.
pub fn build_feature_collection(document: &Document) -> ExportResult<Value> {
    FeatureCollection::from_document(document).to_value()
}

/// `featureType` comes first and always reads `"line"`, even when the stored
/// properties carry a `featureType` of their own.
fn line_feature(line: LineFeature<'_>) -> Feature {
    let mut properties = Map::new();
    properties.insert(keys::FEATURE_TYPE.into(), FEATURE_TYPE_LINE.into());
    if let Some(stored) = line.properties() {
        for (key, value) in stored {
            if key != keys::FEATURE_TYPE {
                properties.insert(key.clone(), value.clone());
            }
        }
    }
    Feature {
        geometry: line.geometry().cloned().unwrap_or(Value::Null),
        properties,
    }
}

fn traffic_light_feature(light: TrafficLight<'_>) -> Feature {
    let mut properties = Map::new();
    properties.insert(keys::FEATURE_TYPE.into(), FEATURE_TYPE_TRAFFIC_LIGHT.into());
    Feature {
        geometry: light.geometry().cloned().unwrap_or(Value::Null),
        properties,
    }
}
