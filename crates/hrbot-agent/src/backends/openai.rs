use super::LlmBackend;
use crate::config::{LlmProvider, ModelConfig};
use async_trait::async_trait;
use hrbot_core::{HrError, HrResult, Message, Role};
use tracing::debug;

/// OpenAI-compatible API backend.
///
/// Works with OpenAI, OpenRouter, Groq, Ollama, and any other provider
/// that implements the OpenAI chat completions API.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    /// Build the HTTP client with the configured request timeout.
    pub fn new(config: ModelConfig) -> HrResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HrError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    fn build_messages(
        &self,
        system_prompt: Option<&str>,
        messages: &[Message],
    ) -> Vec<serde_json::Value> {
        let mut api_messages: Vec<serde_json::Value> = Vec::new();

        if let Some(sys) = system_prompt {
            api_messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }

        for m in messages {
            api_messages.push(serde_json::json!({
                "role": match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::System => "system",
                },
                "content": m.content
            }));
        }

        api_messages
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter requires extra headers
        if matches!(self.config.provider, LlmProvider::OpenRouter) {
            request.header("X-Title", "hrbot")
        } else {
            request
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn chat(&self, system_prompt: Option<&str>, messages: &[Message]) -> HrResult<String> {
        if !self.config.has_api_key() {
            return Err(HrError::Config(format!(
                "No API key configured (set {})",
                self.config.provider.api_key_env()
            )));
        }

        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let body = serde_json::json!({
            "model": self.config.model_id,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": self.build_messages(system_prompt, messages),
        });

        debug!(model = %self.config.model_id, url = %url, "Sending chat completion");

        let resp = self
            .add_provider_headers(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| HrError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| HrError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(HrError::Http(format!(
                "OpenAI API error {}: {}",
                status, resp_body
            )));
        }

        parse_openai_response(&resp_body)
    }
}

/// Extract `choices[0].message.content`, trimmed. Empty content is an error.
pub fn parse_openai_response(body: &serde_json::Value) -> HrResult<String> {
    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| HrError::Generation(format!("Response has no message content: {}", body)))?
        .trim();

    if content.is_empty() {
        return Err(HrError::Generation("Model returned empty content".to_string()));
    }
    Ok(content.to_string())
}
