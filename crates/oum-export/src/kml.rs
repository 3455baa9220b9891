//! KML 2.2 document generation.

use oum_types::{Coordinate, Document, LineFeature, TrafficLight, LINE_ATTRIBUTES};
use tracing::debug;

use crate::xml::escape;

/// Name of the exported `<Document>` element.
pub const DEFAULT_DOCUMENT_NAME: &str = "OpenUrbanMap Export";
/// Placemark name for lines without a name of their own.
pub const DEFAULT_UNNAMED_LABEL: &str = "Без имени";

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const VISIBLE_ATTRIBUTE: &str = "visible";

/// Labels used when rendering a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KmlOptions {
    pub document_name: String,
    pub unnamed_label: String,
}

impl Default for KmlOptions {
    fn default() -> Self {
        Self {
            document_name: DEFAULT_DOCUMENT_NAME.into(),
            unnamed_label: DEFAULT_UNNAMED_LABEL.into(),
        }
    }
}

/// Render a document with the default labels.
pub fn build_kml(document: &Document) -> String {
    KmlEncoder::default().encode(document)
}

/// Renders a [`Document`] as a KML string.
///
/// Lines become tessellated `LineString` placemarks carrying their lane
/// attributes as `ExtendedData`; traffic lights become `Point` placemarks
/// numbered by position. All text is escaped.
#[derive(Clone, Debug, Default)]
pub struct KmlEncoder {
    options: KmlOptions,
}

impl KmlEncoder {
    pub fn new(options: KmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &KmlOptions {
        &self.options
    }

    pub fn encode(&self, document: &Document) -> String {
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<kml xmlns=\"{KML_NAMESPACE}\">\n"));
        xml.push_str("  <Document>\n");
        xml.push_str(&format!(
            "    <name>{}</name>\n",
            escape(&self.options.document_name)
        ));

        for line in document.lines() {
            self.push_line(&mut xml, line);
        }
        for (index, light) in document.traffic_lights().enumerate() {
            push_traffic_light(&mut xml, index + 1, light);
        }

        xml.push_str("  </Document>\n");
        xml.push_str("</kml>\n");

        debug!(
            lines = document.line_count(),
            traffic_lights = document.traffic_light_count(),
            bytes = xml.len(),
            "rendered KML"
        );
        xml
    }

    fn push_line(&self, xml: &mut String, line: LineFeature<'_>) {
        let name = line.name();
        let name = if name.is_truthy() {
            name.to_string()
        } else {
            self.options.unnamed_label.clone()
        };

        xml.push_str("    <Placemark>\n");
        xml.push_str(&format!("      <name>{}</name>\n", escape(&name)));
        xml.push_str("      <ExtendedData>\n");
        for key in LINE_ATTRIBUTES {
            push_data(xml, key, &line.property(key).to_string());
        }
        push_data(xml, VISIBLE_ATTRIBUTE, &line.visible_value().to_string());
        xml.push_str("      </ExtendedData>\n");
        xml.push_str("      <LineString>\n");
        xml.push_str("        <tessellate>1</tessellate>\n");
        xml.push_str(&format!(
            "        <coordinates>{}</coordinates>\n",
            coordinate_text(&line.coordinates())
        ));
        xml.push_str("      </LineString>\n");
        xml.push_str("    </Placemark>\n");
    }
}

fn push_traffic_light(xml: &mut String, number: usize, light: TrafficLight<'_>) {
    xml.push_str("    <Placemark>\n");
    xml.push_str(&format!("      <name>Traffic light {number}</name>\n"));
    xml.push_str("      <Point>\n");
    xml.push_str(&format!(
        "        <coordinates>{}</coordinates>\n",
        kml_position(light.position())
    ));
    xml.push_str("      </Point>\n");
    xml.push_str("    </Placemark>\n");
}

fn push_data(xml: &mut String, name: &str, value: &str) {
    xml.push_str(&format!(
        "        <Data name=\"{}\"><value>{}</value></Data>\n",
        escape(name),
        escape(value)
    ));
}

/// `lng,lat,0` with elevation pinned to zero.
fn kml_position(c: Coordinate) -> String {
    format!("{},{},0", c.lng, c.lat)
}

fn coordinate_text(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(|c| kml_position(*c))
        .collect::<Vec<_>>()
        .join(" ")
}
