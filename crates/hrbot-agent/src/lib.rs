//! Language-model access and recommendation generation for hrbot.
//!
//! # Main types
//!
//! - [`ModelConfig`] / [`LlmProvider`]: Which OpenAI-compatible API to call and how.
//! - [`LlmBackend`]: Trait implemented by provider backends.
//! - [`LlmClient`]: Dispatches to the configured backend.
//! - [`ResponseGenerator`]: Builds the prompt, calls the model, falls back to a template.
//! - [`Recommendation`]: Generated text tagged with the path that produced it.

/// Provider backends.
pub mod backends;
/// Model settings.
pub mod config;
/// Backend dispatch.
pub mod llm;
/// Recommendation generation with template fallback.
pub mod recommend;

pub use backends::openai::OpenAiBackend;
pub use backends::LlmBackend;
pub use config::{LlmProvider, ModelConfig};
pub use llm::LlmClient;
pub use recommend::{Recommendation, RecommendationSource, ResponseGenerator};
