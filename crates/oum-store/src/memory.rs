use std::sync::RwLock;

use oum_types::Document;

use crate::error::{StoreError, StoreResult};
use crate::format;
use crate::traits::FeatureStore;

/// In-memory store.
///
/// Intended for tests and embedding. The document is held in its serialized
/// text form, exactly as [`FileStore`](crate::FileStore) would write it, so
/// every load re-parses and corrupted contents can be simulated with
/// [`with_contents`](Self::with_contents).
pub struct InMemoryStore {
    contents: RwLock<Option<Vec<u8>>>,
}

impl InMemoryStore {
    /// Create a store that has never been written.
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(None),
        }
    }

    /// Create a store pre-loaded with raw stored text.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: RwLock::new(Some(bytes.into())),
        }
    }

    /// The raw stored text, if anything has been written.
    pub fn contents(&self) -> StoreResult<Option<Vec<u8>>> {
        let guard = self.contents.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Forget the stored document, as if it had never been saved.
    pub fn clear(&self) -> StoreResult<()> {
        *self.contents.write().map_err(|_| StoreError::LockPoisoned)? = None;
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureStore for InMemoryStore {
    fn load(&self) -> StoreResult<Document> {
        let guard = self.contents.read().map_err(|_| StoreError::LockPoisoned)?;
        match guard.as_deref() {
            None => Ok(Document::new()),
            Some(bytes) => format::decode(bytes),
        }
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let data = format::encode(document)?;
        *self.contents.write().map_err(|_| StoreError::LockPoisoned)? = Some(data);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self
            .contents
            .read()
            .ok()
            .and_then(|c| c.as_ref().map(Vec::len));
        f.debug_struct("InMemoryStore")
            .field("stored_bytes", &size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oum_types::{Coordinate, NewLine};

    // -----------------------------------------------------------------------
    // Load / save
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_store_loads_empty_document() {
        let store = InMemoryStore::new();
        assert_eq!(store.load().unwrap(), Document::new());
        assert!(store.contents().unwrap().is_none());
    }

    #[test]
    fn save_and_load() {
        let store = InMemoryStore::new();
        let mut doc = Document::new();
        doc.push_line(NewLine::new([Coordinate::new(1.0, 2.0)])).unwrap();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn load_does_not_cache() {
        let store = InMemoryStore::new();
        let first = store.load().unwrap();
        let mut doc = Document::new();
        doc.push_traffic_light(Coordinate::new(3.0, 4.0)).unwrap();
        store.save(&doc).unwrap();
        assert_ne!(store.load().unwrap(), first);
    }

    #[test]
    fn contents_match_file_format() {
        let store = InMemoryStore::new();
        store.save(&Document::new()).unwrap();
        assert_eq!(
            store.contents().unwrap().unwrap(),
            format::encode(&Document::new()).unwrap()
        );
    }

    // -----------------------------------------------------------------------
    // Corruption
    // -----------------------------------------------------------------------

    #[test]
    fn corrupted_contents_error_without_document() {
        let store = InMemoryStore::with_contents("{\"lines\": [}");
        let err = store.load().unwrap_err();
        assert!(err.is_corrupted());
        // Still corrupted on a second read: nothing was repaired.
        assert!(store.load().unwrap_err().is_corrupted());
    }

    #[test]
    fn save_recovers_from_corruption() {
        let store = InMemoryStore::with_contents("nope");
        store.save(&Document::new()).unwrap();
        assert_eq!(store.load().unwrap(), Document::new());
    }

    #[test]
    fn clear_resets_to_empty() {
        let store = InMemoryStore::with_contents("nope");
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Document::new());
    }

    // -----------------------------------------------------------------------
    // Concurrent access
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_writers_last_one_wins() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut doc = Document::new();
                    doc.push_traffic_light(Coordinate::new(f64::from(i), 0.0))
                        .unwrap();
                    store.save(&doc).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        let doc = store.load().unwrap();
        assert_eq!(doc.traffic_light_count(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryStore::new();
        store.save(&Document::new()).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryStore"));
        assert!(debug.contains("stored_bytes"));
    }
}
