//! Route definitions for the orderbot gateway.
//!
//! Provides the liveness banner, health check, and the chat endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use orderbot_common::config::GatewayConfig;
use orderbot_common::error::Error;

use crate::provider::{CompletionProvider, CompletionRequest, OpenAiProvider};
use crate::session::{trim, Message, SessionStore, KEEP_LAST};

/// Maximum accepted user message length, in characters.
const MESSAGE_MAX_CHARS: usize = 2000;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    /// `None` when the API credential is unset in the environment. The
    /// gateway still serves; `/chat` reports the missing key per request.
    pub provider: Option<Arc<dyn CompletionProvider>>,
    pub model: String,
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatIn {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Chat response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatOut {
    pub session_id: String,
    pub answer: String,
}

/// Error response with a human-readable detail string.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Map a service error onto the HTTP error tuple the handlers return.
fn http_error(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            detail: err.into_detail(),
        }),
    )
}

/// Liveness banner response.
#[derive(Debug, Serialize, Deserialize)]
pub struct BannerResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Build the gateway router from configuration, wiring the real
/// completion provider when a credential is present.
pub fn build_router(config: &GatewayConfig) -> Router {
    let provider: Option<Arc<dyn CompletionProvider>> = config.api_key.as_ref().map(|key| {
        Arc::new(OpenAiProvider::with_base_url(key, &config.openai_base_url))
            as Arc<dyn CompletionProvider>
    });

    let state = AppState {
        sessions: Arc::new(SessionStore::new()),
        provider,
        model: config.model.clone(),
    };

    build_router_with_state(state)
}

/// Build the router from explicit state. Used by tests to inject a stub
/// provider or inspect the session store.
pub fn build_router_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .with_state(state)
        .layer(cors)
}

/// Liveness banner.
async fn root_handler() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "orderbot gateway running. Visit /health.".into(),
    })
}

/// Health check handler.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

/// Chat handler: merge the user turn into its session, forward the
/// trimmed history to the completion provider, record and return the
/// reply.
///
/// A provider failure after the user message was recorded leaves the
/// session in that partially-mutated state; there is no rollback and no
/// retry.
async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatIn>,
) -> Result<Json<ChatOut>, (StatusCode, Json<ErrorResponse>)> {
    // Validate before touching the store: an invalid request must not
    // create a session.
    let message_chars = payload.message.chars().count();
    if message_chars == 0 || message_chars > MESSAGE_MAX_CHARS {
        return Err(http_error(Error::InvalidInput(format!(
            "message must be between 1 and {} characters",
            MESSAGE_MAX_CHARS
        ))));
    }

    let session_id = payload
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let session = state.sessions.get_or_create(&session_id).await;

    // Hold the session lock for the whole exchange so concurrent requests
    // against the same token cannot interleave their appends.
    let mut history = session.lock().await;

    history.push(Message::user(payload.message));
    trim(&mut history, KEEP_LAST);

    let Some(provider) = state.provider.as_deref() else {
        return Err(http_error(Error::Config(
            "OPENAI_API_KEY not set in container environment".into(),
        )));
    };

    tracing::debug!(
        session_id = %session_id,
        context_len = history.len(),
        provider = provider.name(),
        "Forwarding chat turn"
    );

    let answer = provider
        .complete(CompletionRequest {
            model: state.model.clone(),
            messages: history.clone(),
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, session_id = %session_id, "Completion call failed");
            // Provider failures stay opaque to the caller.
            http_error(Error::External("completion request failed".into()))
        })?;

    history.push(Message::assistant(answer.clone()));
    trim(&mut history, KEEP_LAST);

    Ok(Json(ChatOut { session_id, answer }))
}
