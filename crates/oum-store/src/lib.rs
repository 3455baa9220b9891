//! Persistence for the OpenUrbanMap feature document.
//!
//! The whole feature set lives in one JSON document. This crate loads and
//! saves that document and tells a missing store apart from a corrupted one.
//!
//! # Storage Backends
//!
//! All backends implement the [`FeatureStore`] trait:
//!
//! - [`FileStore`] -- a single pretty-printed JSON file on disk
//! - [`InMemoryStore`] -- holds the serialized text in memory for tests and embedding
//!
//! # Rules
//!
//! 1. A missing store is not an error; it loads as an empty document.
//! 2. Text that does not parse as a JSON object is reported as corruption,
//!    with the parser's diagnostic, and is never rewritten by a load.
//! 3. Saves replace the whole document. There is no merge, no version check
//!    and no backup of the previous contents.
//! 4. Nothing is cached: every load reads the backend again.

pub mod error;
pub mod file;
pub mod format;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::FeatureStore;
