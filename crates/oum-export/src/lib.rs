//! Export encoders for OpenUrbanMap.
//!
//! Both encoders are pure functions of a borrowed [`Document`]: they never
//! mutate it and do no I/O beyond building an in-memory buffer.
//!
//! # Formats
//!
//! - **KML** ([`kml`]): KML 2.2 text, one placemark per line and per traffic light
//! - **KMZ** ([`kmz`]): the KML deflated into a ZIP archive as `doc.kml`
//! - **GeoJSON** ([`geojson`]): a `FeatureCollection` with a `featureType`
//!   discriminator on every feature
//!
//! [`Document`]: oum_types::Document

pub mod error;
pub mod geojson;
pub mod kml;
pub mod kmz;
pub mod xml;

pub use error::{ExportError, ExportResult};
pub use geojson::{build_feature_collection, Feature, FeatureCollection};
pub use kml::{build_kml, KmlEncoder, KmlOptions};
pub use kmz::{kmz_filename, package_kmz, KmzExport, KMZ_MIME_TYPE};
