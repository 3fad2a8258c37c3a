/// OpenAI-compatible chat completions.
pub mod openai;

use async_trait::async_trait;
use hrbot_core::{HrResult, Message};

/// Trait for LLM provider backends.
///
/// Each provider implements this trait to handle API communication. Tests
/// and embedders can plug in their own implementation through
/// [`LlmClient::from_backend`](crate::llm::LlmClient::from_backend).
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Non-streaming chat completion returning the reply text.
    async fn chat(&self, system_prompt: Option<&str>, messages: &[Message]) -> HrResult<String>;
}
