//! Chat-completions client for the external design model.

use async_trait::async_trait;
use atelier_config::ModelConfig;
use atelier_protocol::{ModelError, ModelProvider, PromptMessages};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// OpenAI-compatible request/response shapes.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Model provider backed by an OpenAI-compatible `chat/completions` endpoint.
///
/// The request timeout is set on the underlying client; a timeout surfaces as
/// a plain request error, identical to any other transport failure.
pub struct ChatModelClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatModelClient {
    /// Build a client from model configuration.
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ModelError::Request(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.name.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ModelProvider for ChatModelClient {
    async fn chat(&self, messages: &PromptMessages) -> Result<String, ModelError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: messages.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: messages.user.clone(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            "model request (model={}, user_len={})",
            self.model,
            messages.user.len()
        );

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ModelError::Request(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ModelError::Response(format!(
                "model API error {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Response(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Response("response contained no choices".to_string()))
    }
}
