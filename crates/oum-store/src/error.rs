/// Errors from feature store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The persisted document exists but is not a well-formed JSON object.
    #[error("Corrupted data file: {reason}")]
    Corrupted { reason: String },

    /// Serialization failure while writing the document.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous holder of the in-memory lock panicked.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Returns `true` for the corruption case.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
