//! OpenAI-compatible chat completions provider (Groq by default)

use async_trait::async_trait;
use reqwest::Client;

use super::provider_trait::{
    ChatMessage, ChatRequest, LLMProviderTrait, MessageRole, ProviderError, TokenUsage,
};

pub const GROQ_CHAT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Chat completions over any OpenAI-compatible HTTP API
pub struct OpenAICompatibleProvider {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAICompatibleProvider {
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        if api_key.is_some() {
            tracing::info!("Chat provider initialized with API key");
        } else {
            tracing::warn!("Chat provider created without API key - answers will be placeholders");
        }

        Self {
            client: Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    /// Groq's hosted endpoint
    pub fn groq(api_key: Option<String>) -> Self {
        Self::new(api_key, GROQ_CHAT_ENDPOINT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn message_to_openai(msg: &ChatMessage) -> serde_json::Value {
        let role = match msg.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        serde_json::json!({
            "role": role,
            "content": msg.content
        })
    }

    /// Extract the first choice's text from a chat completions response
    pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, ProviderError> {
        let message = json
            .pointer("/choices/0/message")
            .ok_or_else(|| ProviderError::ParseError("response has no choices".to_string()))?;

        let usage = json.get("usage").and_then(|u| {
            Some(TokenUsage {
                input_tokens: u["prompt_tokens"].as_u64()? as u32,
                output_tokens: u["completion_tokens"].as_u64()? as u32,
                total_tokens: u["total_tokens"].as_u64()? as u32,
            })
        });
        if let Some(usage) = usage {
            tracing::debug!("Chat usage: {} tokens", usage.total_tokens);
        }

        Ok(message["content"].as_str().unwrap_or("").trim().to_string())
    }
}

#[async_trait]
impl LLMProviderTrait for OpenAICompatibleProvider {
    fn name(&self) -> &'static str {
        "OpenAI-compatible"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let auth_header = self
            .api_key
            .as_ref()
            .map(|k| format!("Bearer {}", k))
            .ok_or_else(|| ProviderError::AuthError("No API key configured".to_string()))?;

        let messages: Vec<serde_json::Value> =
            request.messages.iter().map(Self::message_to_openai).collect();

        let payload = serde_json::json!({
            "model": request.config.model,
            "temperature": request.config.temperature,
            "max_tokens": request.config.max_tokens,
            "messages": messages
        });

        tracing::debug!(
            "[Chat] Sending request: model={}, messages={}",
            request.config.model,
            messages.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                let retry_after_ms = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(|secs| secs * 1000);
                return Err(ProviderError::RateLimited { retry_after_ms });
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::parse_response(&json)
    }
}
