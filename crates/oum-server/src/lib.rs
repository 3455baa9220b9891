//! HTTP server for OpenUrbanMap.
//!
//! Serves the drawing page's JSON API: the feature document, its KMZ and
//! GeoJSON exports, and the map settings the page starts from.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::OumServer;
