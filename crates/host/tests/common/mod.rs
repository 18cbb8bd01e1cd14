//! Common test utilities
#![allow(dead_code)] // Not every helper is used by every test file

use axum::body::{to_bytes, Body};
use axum::Router;
use gridfeed_core::GridConfig;
use gridfeed_host::server::{router, AppState};
use http::{HeaderMap, Request, StatusCode};
use tower::ServiceExt;

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub fn app(grid: &GridConfig) -> Router {
    router(AppState::new(grid).expect("config should serialize"))
}

/// Issue a single GET against a fresh router
pub async fn get(app: Router, path: &str) -> Reply {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        headers,
        body: body.to_vec(),
    }
}
