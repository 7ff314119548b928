//! Orderbot Gateway - per-session chat history and completion API proxying.
//!
//! This crate provides the HTTP gateway for orderbot:
//! - Session store keyed by opaque token, seeded with the lead-collection
//!   system prompt and trimmed to a bounded recent window
//! - Completion provider client for the hosted model API
//! - Chat endpoint that merges a user turn into its session, forwards the
//!   trimmed history, and returns the reply
//!
//! ## Architecture
//!
//! ```text
//! Client Shell → Gateway (validate → session append → trim) → Completion API
//!                              ↓
//!                       Record reply in session
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod provider;
pub mod routes;
pub mod session;

pub use provider::{CompletionProvider, CompletionRequest, OpenAiProvider, ProviderError};
pub use routes::{build_router, build_router_with_state, AppState};
pub use session::{trim, Message, Role, SessionStore, KEEP_LAST};

use std::net::SocketAddr;

use orderbot_common::config::GatewayConfig;

/// Start the gateway server.
pub async fn start_server(config: &GatewayConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from((
        config.host.parse::<std::net::IpAddr>()?,
        config.port,
    ));

    let router = build_router(config);

    tracing::info!("Starting orderbot gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
