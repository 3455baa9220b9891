//! KMZ packaging: a ZIP archive holding a single deflated `doc.kml`.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use oum_types::Document;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportResult;
use crate::kml::KmlEncoder;

/// Name of the KML entry inside the archive.
pub const KML_ENTRY_NAME: &str = "doc.kml";
/// Media type for KMZ downloads.
pub const KMZ_MIME_TYPE: &str = "application/vnd.google-earth.kmz";

const FILENAME_PREFIX: &str = "openurbanmap_";

/// A packaged KMZ archive and the filename it should be offered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KmzExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl KmzExport {
    /// Render `document` and package it, naming the file after `at`.
    pub fn build(
        document: &Document,
        encoder: &KmlEncoder,
        at: DateTime<Utc>,
    ) -> ExportResult<Self> {
        let kml = encoder.encode(document);
        let bytes = package_kmz(&kml)?;
        Ok(Self {
            filename: kmz_filename(at),
            bytes,
        })
    }
}

/// Wrap a KML string into a single-entry deflate archive.
///
/// Entries carry the fixed DOS epoch timestamp, so equal input always yields
/// equal bytes.
pub fn package_kmz(kml: &str) -> ExportResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(KML_ENTRY_NAME, options)?;
    zip.write_all(kml.as_bytes())?;
    let bytes = zip.finish()?.into_inner();

    debug!(kml_bytes = kml.len(), kmz_bytes = bytes.len(), "packaged KMZ");
    Ok(bytes)
}

/// `openurbanmap_YYYYMMDD_HHMMSS.kmz` for the given UTC instant.
pub fn kmz_filename(at: DateTime<Utc>) -> String {
    format!("{FILENAME_PREFIX}{}.kmz", at.format("%Y%m%d_%H%M%S"))
}
