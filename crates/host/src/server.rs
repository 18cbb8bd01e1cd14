//! HTTP surface: the grid page, its assets and the startup config script

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gridfeed_core::GridConfig;
use http::{header, StatusCode};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::embedded;

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    /// Pre-rendered body of `/config.js`
    config_js: Arc<str>,
}

impl AppState {
    pub fn new(grid: &GridConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config_js: config_script(grid)?.into(),
        })
    }
}

/// `window.GRIDFEED_CONFIG = {...};` for the page to read before the wasm starts
pub fn config_script(grid: &GridConfig) -> anyhow::Result<String> {
    let json = serde_json::to_string(grid)?;
    Ok(format!("window.GRIDFEED_CONFIG = {json};"))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(serve_index))
        .route("/config.js", get(serve_config_js))
        .route("/health", get(health))
        .route("/*path", get(serve_static))
        .with_state(state)
        .layer(cors)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn serve_config_js(State(state): State<AppState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        state.config_js.to_string(),
    )
        .into_response()
}

async fn serve_index() -> Response {
    index_or_404()
}

/// Serve an embedded asset; unknown paths fall back to the page
async fn serve_static(Path(path): Path<String>) -> Response {
    let Some((data, mime)) = embedded::get_asset(&path) else {
        tracing::debug!(%path, "Unknown asset, serving index");
        return index_or_404();
    };

    // Module scripts need a JavaScript type regardless of mime_guess's choice
    let content_type = if std::path::Path::new(&path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("js"))
    {
        "application/javascript"
    } else {
        mime
    };

    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        Body::from(data),
    )
        .into_response()
}

fn index_or_404() -> Response {
    match embedded::get_asset(embedded::INDEX) {
        Some((data, mime)) => ([(header::CONTENT_TYPE, mime)], Body::from(data)).into_response(),
        None => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}
