//! Chat-completion client.
//!
//! [`ChatClient`] is the seam between the analysis stage and the remote
//! model. The bundled [`OpenAiChatClient`] speaks the OpenAI
//! `/chat/completions` protocol, which most hosted and self-hosted gateways
//! also accept. Tests and embedders can supply their own implementation via
//! [`crate::config::ReviewConfigBuilder::client`].
//!
//! The credential is passed on every call rather than stored in the client,
//! so one client can serve many users without holding their secrets.

use crate::config::ReviewConfig;
use crate::error::ContractError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single-turn chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// The model's top answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub content: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Sends one chat-completion request and returns the first choice.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Errors of any kind are reported as [`ContractError::Analysis`].
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &SecretString,
    ) -> Result<ChatResponse, ContractError>;
}

/// [`ChatClient`] for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OpenAiChatClient {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ContractError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ContractError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &ReviewConfig) -> Result<Self, ContractError> {
        Self::new(&config.api_base_url, config.api_timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &SecretString,
    ) -> Result<ChatResponse, ContractError> {
        debug!("POST {} (model {})", self.endpoint, request.model);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContractError::analysis(format!("request timed out: {e}"))
                } else {
                    ContractError::analysis(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ContractError::analysis(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ContractError::analysis(format!(
                "HTTP {}: {}",
                status,
                api_error_message(&body)
            )));
        }

        parse_completion(&body)
    }
}

// ── Wire format ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Decode a successful response body into the first choice's content.
pub(crate) fn parse_completion(body: &str) -> Result<ChatResponse, ContractError> {
    let parsed: CompletionBody = serde_json::from_str(body)
        .map_err(|e| ContractError::analysis(format!("malformed response: {e}")))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ContractError::analysis("malformed response: no choices returned"))?
        .message
        .content
        .ok_or_else(|| ContractError::analysis("malformed response: first choice has no content"))?;

    let (prompt_tokens, completion_tokens) = parsed
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    Ok(ChatResponse {
        content,
        prompt_tokens,
        completion_tokens,
    })
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) => e.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
