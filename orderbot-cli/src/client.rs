//! HTTP client for the orderbot gateway.
//!
//! Thin wrapper around reqwest with a fixed request timeout. Transport
//! and gateway errors come back as `anyhow` errors for the shell to
//! render inline; the shell never crashes on them.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use orderbot_common::config::ClientConfig;

/// Chat request toward the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Chat reply from the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub session_id: String,
    pub answer: String,
}

/// Gateway error body.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Orderbot gateway HTTP client.
pub struct GatewayClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl GatewayClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    /// The gateway base URL this client targets.
    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    /// Send one chat turn, with the last known session id when present.
    pub async fn chat(&self, message: &str, session_id: Option<&str>) -> Result<ChatReply> {
        let url = format!("{}/chat", self.config.api_base);
        let request = ChatRequest {
            message: message.to_string(),
            session_id: session_id.map(String::from),
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            // Prefer the gateway's detail string; fall back to the status.
            let detail = response
                .json::<ErrorDetail>()
                .await
                .map(|e| e.detail)
                .unwrap_or_else(|_| format!("gateway returned {status}"));
            return Err(anyhow!(detail));
        }

        Ok(response.json::<ChatReply>().await?)
    }

    /// Check gateway liveness.
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.config.api_base);
        let response = self.http.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}
