//! High-level API for OpenUrbanMap.
//!
//! [`OpenUrbanMap`] is the single entry point for callers such as the HTTP
//! server and the CLI. It exposes four operations over the feature store:
//!
//! - [`get`](OpenUrbanMap::get): read the current document
//! - [`put`](OpenUrbanMap::put): replace it with an arbitrary JSON object
//! - [`export_kmz`](OpenUrbanMap::export_kmz): KMZ archive plus filename
//! - [`export_geojson`](OpenUrbanMap::export_geojson): GeoJSON `FeatureCollection`

pub mod error;
pub mod facade;

pub use error::{SdkError, SdkResult};
pub use facade::OpenUrbanMap;

// Re-export key types
pub use oum_export::{KmlOptions, KmzExport, KMZ_MIME_TYPE};
pub use oum_store::{FeatureStore, FileStore, InMemoryStore};
pub use oum_types::{Document, MapConfig};
