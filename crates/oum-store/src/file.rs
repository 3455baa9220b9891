use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use oum_types::Document;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::format;
use crate::traits::FeatureStore;

/// File-backed store holding the document as one JSON file.
///
/// Saves go through a temporary file in the target directory and a rename,
/// so readers only ever see the previous or the new document in full.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Location of the store relative to the application root.
    pub const DEFAULT_PATH: &'static str = "data/store.json";

    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_PATH`](Self::DEFAULT_PATH) under `root`.
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(Self::DEFAULT_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file a save lands in: the link target when the store path is a
    /// symlink, so the link itself survives the rename.
    fn save_target(&self) -> io::Result<PathBuf> {
        match fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(&self.path) {
                Ok(target) => Ok(target),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
                Err(e) => Err(e),
            },
            Ok(_) => Ok(self.path.clone()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(e),
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Mode for a store file created by the first save, before the umask.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(NEW_FILE_MODE))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl FeatureStore for FileStore {
    fn load(&self) -> StoreResult<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file missing; using empty document");
                return Ok(Document::new());
            }
            Err(e) => return Err(e.into()),
        };

        match format::decode(&bytes) {
            Ok(document) => {
                debug!(
                    path = %self.path.display(),
                    bytes = bytes.len(),
                    lines = document.line_count(),
                    traffic_lights = document.traffic_light_count(),
                    "loaded store"
                );
                Ok(document)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store file is corrupted");
                Err(e)
            }
        }
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let data = format::encode(document)?;
        let target = self.save_target()?;
        let dir = parent_dir(&target);
        fs::create_dir_all(dir)?;

        let mut tmp = temp_file_in(dir)?;
        tmp.write_all(&data)?;
        match fs::metadata(&target) {
            Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&target)
            .map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = data.len(), "saved store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oum_types::{keys, Coordinate, NewLine};
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        (dir, store)
    }

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.push_line(
            NewLine::drawn([Coordinate::new(76.5, 43.25), Coordinate::new(76.75, 43.5)])
                .property(keys::NAME, "Al-Farabi"),
        )
        .unwrap();
        doc.push_traffic_light(Coordinate::new(76.5, 43.25)).unwrap();
        doc
    }

    #[test]
    fn missing_file_loads_empty_document() {
        let (_dir, store) = temp_store();
        let doc = store.load().unwrap();
        assert_eq!(doc, Document::new());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let (dir, store) = temp_store();
        assert!(!dir.path().join("data").exists());
        store.save(&Document::new()).unwrap();
        assert!(store.path().is_file());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (_dir, store) = temp_store();
        let doc = sample_document();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn save_overwrites_previous_document() {
        let (_dir, store) = temp_store();
        store.save(&sample_document()).unwrap();
        store.save(&Document::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupted_file_is_reported_and_left_untouched() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.is_corrupted());
        assert!(err.to_string().starts_with("Corrupted data file: "));
        assert_eq!(fs::read(store.path()).unwrap(), b"{ not json");
    }

    #[test]
    fn save_replaces_corrupted_file() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"garbage").unwrap();

        let doc = sample_document();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn stored_text_is_human_readable() {
        let (_dir, store) = temp_store();
        let doc = Document::from_value(json!({
            "lines": [{"properties": {"name": "Жибек Жолы"}}],
            "trafficLights": []
        }))
        .unwrap();
        store.save(&doc).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  \"lines\": ["));
        assert!(text.contains("Жибек Жолы"));
    }

    #[test]
    fn unvalidated_documents_are_stored_verbatim() {
        let (_dir, store) = temp_store();
        let doc = Document::from_value(json!({"lines": 5, "note": "free-form"})).unwrap();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn no_temp_files_left_behind() {
        let (dir, store) = temp_store();
        store.save(&sample_document()).unwrap();
        store.save(&sample_document()).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path().join("data"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("store.json")]);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.save(&Document::new()).unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o664)).unwrap();

        store.save(&sample_document()).unwrap();
        assert_eq!(mode(store.path()), 0o664);
        assert_eq!(store.load().unwrap(), sample_document());
    }

    #[cfg(unix)]
    #[test]
    fn new_store_file_is_readable_like_a_created_file() {
        let (dir, store) = temp_store();
        store.save(&Document::new()).unwrap();

        // Same umask, created the ordinary way.
        let reference = dir.path().join("reference.json");
        fs::File::create(&reference).unwrap();
        assert_eq!(mode(store.path()), mode(&reference) & 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_keeps_the_link() {
        let (dir, store) = temp_store();
        let real = dir.path().join("real.json");
        fs::write(&real, b"{}").unwrap();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&real, store.path()).unwrap();

        let doc = sample_document();
        store.save(&doc).unwrap();

        assert!(fs::symlink_metadata(store.path())
            .unwrap()
            .file_type()
            .is_symlink());
        let stored = FileStore::new(&real).load().unwrap();
        assert_eq!(stored, doc);
    }

    #[test]
    fn default_path() {
        assert_eq!(FileStore::default().path(), Path::new("data/store.json"));
    }
}
