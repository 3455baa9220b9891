use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_kind, TypeError, TypeResult};
use crate::feature::{traffic_light_json, LineFeature, NewLine, TrafficLight};
use crate::geometry::Coordinate;

/// Key holding the road lines.
pub const LINES_KEY: &str = "lines";
/// Key holding the traffic lights.
pub const TRAFFIC_LIGHTS_KEY: &str = "trafficLights";

/// The single persisted object holding every drawn feature.
///
/// A `Document` is always a JSON object, but its contents are not validated:
/// whatever object a caller writes is what gets stored and read back. Feature
/// access goes through the lenient [`LineFeature`] and [`TrafficLight`]
/// views, which treat a missing or non-array collection as empty.
///
/// Equality is structural and ignores key order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// A fresh document with empty `lines` and `trafficLights`.
    pub fn new() -> Self {
        let mut map = Map::new();
        map.insert(LINES_KEY.into(), Value::Array(Vec::new()));
        map.insert(TRAFFIC_LIGHTS_KEY.into(), Value::Array(Vec::new()));
        Self(map)
    }

    /// Wrap an arbitrary JSON value. Only objects are accepted.
    pub fn from_value(value: Value) -> TypeResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TypeError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = LineFeature<'_>> + '_ {
        self.collection(LINES_KEY).iter().map(LineFeature::new)
    }

    pub fn traffic_lights(&self) -> impl ExactSizeIterator<Item = TrafficLight<'_>> + '_ {
        self.collection(TRAFFIC_LIGHTS_KEY)
            .iter()
            .map(TrafficLight::new)
    }

    pub fn line_count(&self) -> usize {
        self.collection(LINES_KEY).len()
    }

    pub fn traffic_light_count(&self) -> usize {
        self.collection(TRAFFIC_LIGHTS_KEY).len()
    }

    /// Returns `true` when there are neither lines nor traffic lights.
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0 && self.traffic_light_count() == 0
    }

    /// Append a line. Fails if `lines` exists but is not an array.
    pub fn push_line(&mut self, line: NewLine) -> TypeResult<()> {
        self.collection_mut(LINES_KEY)?.push(line.into_json());
        Ok(())
    }

    /// Append a traffic light at `position`.
    pub fn push_traffic_light(&mut self, position: Coordinate) -> TypeResult<()> {
        self.collection_mut(TRAFFIC_LIGHTS_KEY)?
            .push(traffic_light_json(position));
        Ok(())
    }

    fn collection(&self, key: &str) -> &[Value] {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn collection_mut(&mut self, key: &'static str) -> TypeResult<&mut Vec<Value>> {
        match self
            .0
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => Ok(items),
            _ => Err(TypeError::NotAnArray(key)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Value> for Document {
    type Error = TypeError;

    fn try_from(value: Value) -> TypeResult<Self> {
        Self::from_value(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::keys;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn new_document_has_both_collections() {
        let doc = Document::new();
        assert_eq!(doc.clone().into_value(), json!({"lines": [], "trafficLights": []}));
        assert!(doc.is_empty());
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert_eq!(
            Document::from_value(json!("not an object")),
            Err(TypeError::NotAnObject("string"))
        );
        assert_eq!(
            Document::from_value(json!([1, 2])),
            Err(TypeError::NotAnObject("array"))
        );
        assert_eq!(Document::try_from(Value::Null), Err(TypeError::NotAnObject("null")));
    }

    #[test]
    fn missing_collections_read_as_empty() {
        let doc = Document::from_value(json!({"other": true})).unwrap();
        assert_eq!(doc.lines().len(), 0);
        assert_eq!(doc.traffic_lights().len(), 0);
        assert!(doc.is_empty());
    }

    #[test]
    fn structurally_invalid_collections_are_kept() {
        let raw = json!({"lines": 5, "trafficLights": "x"});
        let doc = Document::from_value(raw.clone()).unwrap();
        assert_eq!(doc.line_count(), 0);
        assert_eq!(doc.into_value(), raw);
    }

    #[test]
    fn push_features() {
        let mut doc = Document::new();
        doc.push_line(NewLine::new([Coordinate::new(1.0, 2.0)]).property(keys::NAME, "Abay"))
            .unwrap();
        doc.push_traffic_light(Coordinate::new(3.0, 4.0)).unwrap();
        doc.push_traffic_light(Coordinate::new(5.0, 6.0)).unwrap();

        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.traffic_light_count(), 2);
        let line = doc.lines().next().unwrap();
        assert_eq!(line.name().as_str(), Some("Abay"));
        let positions: Vec<Coordinate> = doc.traffic_lights().map(|t| t.position()).collect();
        assert_eq!(positions, vec![Coordinate::new(3.0, 4.0), Coordinate::new(5.0, 6.0)]);
    }

    #[test]
    fn push_into_missing_collection_creates_it() {
        let mut doc = Document::from_value(json!({})).unwrap();
        doc.push_traffic_light(Coordinate::origin()).unwrap();
        assert_eq!(doc.traffic_light_count(), 1);
    }

    #[test]
    fn push_into_non_array_fails() {
        let mut doc = Document::from_value(json!({"lines": {}})).unwrap();
        let err = doc.push_line(NewLine::new([])).unwrap_err();
        assert_eq!(err, TypeError::NotAnArray(LINES_KEY));
    }

    #[test]
    fn unknown_keys_survive_serde() {
        let raw = json!({
            "lines": [{"id": "line_1", "geometry": null, "extra": [1, 2]}],
            "trafficLights": [],
            "version": 3
        });
        let doc: Document = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn equality_ignores_key_order() {
        let a = Document::from_value(json!({"lines": [], "trafficLights": []})).unwrap();
        let b: Document = serde_json::from_str(r#"{"trafficLights": [], "lines": []}"#).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn json_text_roundtrip(
            names in proptest::collection::vec(".*", 0..4),
            lights in proptest::collection::vec((-720i32..720, -360i32..360), 0..4),
        ) {
            let mut doc = Document::new();
            for name in &names {
                let line = NewLine::drawn([Coordinate::new(76.5, 43.25)])
                    .property(keys::NAME, name.as_str());
                doc.push_line(line).unwrap();
            }
            for (lng, lat) in &lights {
                let position = Coordinate::new(f64::from(*lng) / 4.0, f64::from(*lat) / 4.0);
                doc.push_traffic_light(position).unwrap();
            }
            let text = serde_json::to_string_pretty(&doc).unwrap();
            let back: Document = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(back, doc);
        }
    }
}
