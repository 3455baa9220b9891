use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
