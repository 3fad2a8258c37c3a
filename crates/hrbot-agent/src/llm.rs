use crate::backends::openai::OpenAiBackend;
use crate::backends::LlmBackend;
use crate::config::{LlmProvider, ModelConfig};
use hrbot_core::{HrResult, Message};

/// LLM client that dispatches to the correct provider backend.
///
/// Uses the `LlmBackend` trait to abstract away provider-specific API differences.
pub struct LlmClient {
    backend: Box<dyn LlmBackend>,
}

impl LlmClient {
    /// Create the backend matching `config.provider`.
    pub fn new(config: ModelConfig) -> HrResult<Self> {
        let backend: Box<dyn LlmBackend> = match config.provider {
            LlmProvider::OpenAi | LlmProvider::OpenRouter | LlmProvider::Groq => {
                Box::new(OpenAiBackend::new(config)?)
            }
        };
        Ok(Self { backend })
    }

    /// Create from a pre-built backend (for custom/external providers).
    pub fn from_backend(backend: Box<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Non-streaming chat completion.
    pub async fn chat(&self, system_prompt: Option<&str>, messages: &[Message]) -> HrResult<String> {
        self.backend.chat(system_prompt, messages).await
    }
}
