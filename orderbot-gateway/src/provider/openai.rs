//! OpenAI Responses API provider.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use super::{CompletionProvider, CompletionRequest, ProviderError};
use crate::session::Message;

/// Provider calling the OpenAI Responses API.
///
/// The request carries the full ordered history as `input` with
/// `truncation: "auto"`, so the hosted side drops middle context on its
/// own when the window overflows. No retry and no request timeout beyond
/// the client defaults; a failed call surfaces directly to the handler.
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a new provider against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.openai.com")
    }

    /// Create with a custom base URL (compatible hosts, tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let url = format!("{}/v1/responses", self.base_url);

        let wire_request = ResponsesRequest {
            model: request.model.clone(),
            input: &request.messages,
            truncation: "auto",
        };

        let response = self
            .client
            .post(&url)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| ProviderError {
                provider: "openai".into(),
                model: request.model.clone(),
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError {
                provider: "openai".into(),
                model: request.model,
                message: format!("API error: {}", body),
                status_code: Some(status.as_u16()),
            });
        }

        let wire_response: ResponsesResponse =
            response.json().await.map_err(|e| ProviderError {
                provider: "openai".into(),
                model: request.model.clone(),
                message: format!("Failed to parse response: {}", e),
                status_code: None,
            })?;

        Ok(wire_response.output_text())
    }
}

// ============================================================================
// Responses API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: String,
    input: &'a [Message],
    truncation: &'static str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ResponsesResponse {
    /// Concatenate all `output_text` fragments across message items.
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|content| content.kind == "output_text")
            .map(|content| content.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn test_request_serialization() {
        let messages = vec![
            Message::system_prompt(),
            Message::user("Hi, I need a cake"),
        ];
        let request = ResponsesRequest {
            model: "gpt-4o-mini".into(),
            input: &messages,
            truncation: "auto",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["truncation"], "auto");
        assert_eq!(json["input"].as_array().unwrap().len(), 2);
        assert_eq!(json["input"][0]["role"], "system");
        assert_eq!(json["input"][1]["content"], "Hi, I need a cake");
    }

    #[test]
    fn test_output_text_extraction() {
        let response: ResponsesResponse = serde_json::from_value(serde_json::json!({
            "output": [
                {"type": "reasoning", "content": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "Hello! "},
                    {"type": "output_text", "text": "What's the occasion?"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(response.output_text(), "Hello! What's the occasion?");
    }

    #[test]
    fn test_output_text_empty_output() {
        let response: ResponsesResponse =
            serde_json::from_value(serde_json::json!({"output": []})).unwrap();
        assert_eq!(response.output_text(), "");
    }

    #[test]
    fn test_message_roles_serialize_lowercase() {
        let message = Message {
            role: Role::User,
            content: "x".into(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap()["role"],
            "user"
        );
    }
}
