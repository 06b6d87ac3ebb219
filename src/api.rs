//! HTTP API for the completion proxy

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::proxy::CompletionProxy;
use axum::http::{header, HeaderName, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Headers browsers may send on cross-origin chat requests
const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub proxy: CompletionProxy,
}

impl AppState {
    pub fn new(proxy: CompletionProxy) -> Self {
        Self { proxy }
    }
}

/// Permissive CORS: any origin, fixed header allow-list. `OPTIONS` requests
/// are answered here with an empty 200 and never reach a handler.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
        .expose_headers([header::CONTENT_TYPE])
}

/// Router with CORS and request tracing applied
pub fn app(state: AppState) -> Router {
    create_router(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
