use oum_store::FileStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// OpenUrbanMap HTTP server.
pub struct OumServer {
    config: ServerConfig,
}

impl OumServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router over the configured store file (useful for testing).
    pub fn router(&self) -> axum::Router {
        let store = FileStore::new(&self.config.data_path);
        build_router(AppState::new(store, self.config.map.clone()))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            data = %self.config.data_path.display(),
            "OpenUrbanMap server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
