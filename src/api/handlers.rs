//! HTTP request handlers

use super::types::{ChatResponse, ErrorResponse, LanguagesResponse};
use super::AppState;
use crate::language::Language;
use crate::proxy::ProxyError;
use crate::transcript::TECHNICAL_DIFFICULTY_REPLY;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::Instrument;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/languages", get(list_languages))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

/// The body is taken raw so malformed JSON takes the same 500 path as every
/// other failure instead of an extractor rejection.
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, AppError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id, model = %state.proxy.model_id());

    let response = state
        .proxy
        .handle_body(&body)
        .instrument(span.clone())
        .await?;
    span.in_scope(|| {
        tracing::info!(reply_chars = response.reply.chars().count(), "Chat reply sent");
    });
    Ok(Json(response))
}

// ============================================================
// Languages
// ============================================================

async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Language::all(),
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("dwntwna-concierge ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    ChatFailed(ProxyError),
}

impl From<ProxyError> for AppError {
    fn from(e: ProxyError) -> Self {
        AppError::ChatFailed(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::ChatFailed(e) = self;
        tracing::error!(error = %e, "Error in chat function");

        let body = Json(ErrorResponse {
            reply: TECHNICAL_DIFFICULTY_REPLY.to_string(),
            error: e.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
