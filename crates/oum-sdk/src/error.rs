use oum_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    /// The stored document could not be parsed. Carries the full diagnostic.
    #[error("{0}")]
    Corrupted(String),

    /// A write was not a JSON object.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("export error: {0}")]
    Export(#[from] oum_export::ExportError),
}

impl SdkError {
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<StoreError> for SdkError {
    fn from(err: StoreError) -> Self {
        match err {
            e @ StoreError::Corrupted { .. } => Self::Corrupted(e.to_string()),
            other => Self::Store(other),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
