use std::path::PathBuf;

use chrono::{DateTime, Utc};
use oum_export::{FeatureCollection, KmlEncoder, KmlOptions, KmzExport};
use oum_store::{FeatureStore, FileStore, InMemoryStore};
use oum_types::Document;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{SdkError, SdkResult};

/// High-level OpenUrbanMap API.
///
/// Every call goes back to the store: reads reload the document, writes
/// replace it whole. Nothing is cached between calls and concurrent writers
/// are not coordinated, so the last write wins.
pub struct OpenUrbanMap<S = FileStore> {
    store: S,
    kml: KmlEncoder,
}

impl OpenUrbanMap<FileStore> {
    /// Open a file-backed store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_store(FileStore::new(path))
    }
}

impl OpenUrbanMap<InMemoryStore> {
    /// An ephemeral instance that has never been written.
    pub fn in_memory() -> Self {
        Self::with_store(InMemoryStore::new())
    }
}

impl<S: FeatureStore> OpenUrbanMap<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            kml: KmlEncoder::default(),
        }
    }

    /// Replace the labels used by KMZ exports.
    pub fn with_kml_options(mut self, options: KmlOptions) -> Self {
        self.kml = KmlEncoder::new(options);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ---- Read / write ----

    /// Read the current document. A store that was never written reads as
    /// an empty document; unparseable contents fail with
    /// [`SdkError::Corrupted`].
    pub fn get(&self) -> SdkResult<Document> {
        Ok(self.store.load()?)
    }

    /// Replace the stored document with `raw`.
    ///
    /// Only the top-level shape is checked: `raw` must be a JSON object.
    /// Its `lines` and `trafficLights` are stored as given.
    pub fn put(&self, raw: Value) -> SdkResult<()> {
        let document = Document::from_value(raw).map_err(|e| {
            warn!(error = %e, "rejected document write");
            SdkError::InvalidInput(e.to_string())
        })?;
        self.store.save(&document)?;
        debug!(
            lines = document.line_count(),
            traffic_lights = document.traffic_light_count(),
            "replaced document"
        );
        Ok(())
    }

    /// [`put`](Self::put) for a request body that has not been parsed yet.
    pub fn put_json(&self, text: &str) -> SdkResult<()> {
        let raw: Value = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "rejected unparseable document write");
            SdkError::InvalidInput(e.to_string())
        })?;
        self.put(raw)
    }

    // ---- Exports ----

    /// Export the current document as KMZ, named after the current UTC time.
    pub fn export_kmz(&self) -> SdkResult<KmzExport> {
        self.export_kmz_at(Utc::now())
    }

    /// Export as KMZ with the filename timestamp pinned to `at`.
    pub fn export_kmz_at(&self, at: DateTime<Utc>) -> SdkResult<KmzExport> {
        let document = self.get()?;
        Ok(KmzExport::build(&document, &self.kml, at)?)
    }

    /// Export the current document as a GeoJSON `FeatureCollection`.
    pub fn export_geojson(&self) -> SdkResult<Value> {
        let document = self.get()?;
        Ok(FeatureCollection::from_document(&document).to_value()?)
    }
}

impl<S> std::fmt::Debug for OpenUrbanMap<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenUrbanMap")
            .field("store", &self.store)
            .field("kml", self.kml.options())
            .finish()
    }
}
