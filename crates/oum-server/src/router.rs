use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use oum_sdk::{FeatureStore, MapConfig, OpenUrbanMap};
use tower_http::trace::TraceLayer;

use crate::handler;

/// The façade behind every route, over whichever store the server runs on.
pub type SharedMap = Arc<OpenUrbanMap<Box<dyn FeatureStore>>>;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub oum: SharedMap,
    pub map: Arc<MapConfig>,
}

impl AppState {
    pub fn new(store: impl FeatureStore + 'static, map: MapConfig) -> Self {
        let store: Box<dyn FeatureStore> = Box::new(store);
        Self {
            oum: Arc::new(OpenUrbanMap::with_store(store)),
            map: Arc::new(map),
        }
    }
}

/// Build the axum router with all OpenUrbanMap endpoints.
///
/// Request bodies are not size-capped: a document write is always a full
/// replace, however large the document has grown.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(handler::config_handler))
        .route(
            "/api/data",
            get(handler::get_data_handler).post(handler::post_data_handler),
        )
        .route("/api/export/kmz", get(handler::export_kmz_handler))
        .route("/api/export/geojson", get(handler::export_geojson_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
