use oum_types::Document;

use crate::error::StoreResult;

/// Whole-document feature store.
///
/// All implementations must satisfy these invariants:
/// - `load` on a store that was never written returns [`Document::new`].
/// - `load` returns either a full document or an error, never both, and
///   reports unparseable contents as [`StoreError::Corrupted`].
/// - `load` never modifies what is stored.
/// - `save` replaces the stored document unconditionally.
///
/// [`StoreError::Corrupted`]: crate::StoreError::Corrupted
pub trait FeatureStore: Send + Sync {
    /// Read the current document.
    fn load(&self) -> StoreResult<Document>;

    /// Replace the stored document with `document`.
    fn save(&self, document: &Document) -> StoreResult<()>;
}

impl<T: FeatureStore + ?Sized> FeatureStore for Box<T> {
    fn load(&self) -> StoreResult<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        (**self).save(document)
    }
}

impl<T: FeatureStore + ?Sized> FeatureStore for std::sync::Arc<T> {
    fn load(&self) -> StoreResult<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        (**self).save(document)
    }
}
