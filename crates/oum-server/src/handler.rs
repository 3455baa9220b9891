use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use oum_sdk::{FeatureStore, MapConfig, OpenUrbanMap, SdkError, SdkResult, KMZ_MIME_TYPE};
use serde_json::{json, Value};

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Run a façade call on the blocking pool; store access is synchronous I/O.
async fn run_blocking<T, F>(state: &AppState, f: F) -> ServerResult<T>
where
    T: Send + 'static,
    F: FnOnce(&OpenUrbanMap<Box<dyn FeatureStore>>) -> SdkResult<T> + Send + 'static,
{
    let oum = Arc::clone(&state.oum);
    let result = tokio::task::spawn_blocking(move || f(&oum))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    Ok(result?)
}

/// Drawing page settings.
pub async fn config_handler(State(state): State<AppState>) -> Json<MapConfig> {
    Json(state.map.as_ref().clone())
}

/// Current document. Corruption is reported in the body with status 200 so
/// the page can show it instead of failing the request.
pub async fn get_data_handler(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    match run_blocking(&state, |oum| oum.get()).await {
        Ok(document) => Ok(Json(json!({ "ok": true, "data": document }))),
        Err(ServerError::Sdk(e)) if e.is_corrupted() => {
            Ok(Json(json!({ "ok": false, "error": e.to_string() })))
        }
        Err(e) => Err(e),
    }
}

/// Replace the document with the request body.
pub async fn post_data_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Value>> {
    let text = String::from_utf8(body.to_vec())
        .map_err(|e| ServerError::Sdk(SdkError::InvalidInput(e.to_string())))?;
    run_blocking(&state, move |oum| oum.put_json(&text)).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn export_kmz_handler(State(state): State<AppState>) -> ServerResult<Response> {
    let export = run_blocking(&state, |oum| oum.export_kmz()).await?;
    tracing::info!(filename = %export.filename, bytes = export.bytes.len(), "KMZ export");
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, KMZ_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

pub async fn export_geojson_handler(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    let collection = run_blocking(&state, |oum| oum.export_geojson()).await?;
    Ok(Json(collection))
}
