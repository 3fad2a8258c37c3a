use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat completion providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// api.openai.com.
    #[default]
    OpenAi,
    /// openrouter.ai.
    OpenRouter,
    /// Groq cloud inference (OpenAI-compatible API).
    Groq,
}

impl LlmProvider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
            LlmProvider::Groq => "GROQ_API_KEY",
        }
    }
}

/// Settings from the `[model]` config table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which API to call.
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name sent in each request.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Blank means "read from [`LlmProvider::api_key_env`]".
    #[serde(default)]
    pub api_key: String,
    /// Overrides the provider's default base URL.
    pub api_base_url: Option<String>,
    /// Sampling temperature; non-zero so wording varies.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Reply length bound.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whole-call timeout before the template fallback is used.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model_id() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    250
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model_id: default_model_id(),
            api_key: String::new(),
            api_base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// Base URL of the chat completions API.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
                LlmProvider::Groq => "https://api.groq.com/openai",
            }
        }
    }

    /// `timeout_secs` as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fill a blank `api_key` from the provider's environment variable.
    ///
    /// A missing variable leaves the key blank; generation then falls back to
    /// the template instead of failing startup.
    pub fn resolve_api_key(&mut self) {
        if self.api_key.is_empty() {
            if let Ok(key) = std::env::var(self.provider.api_key_env()) {
                self.api_key = key;
            }
        }
    }

    /// Whether a non-blank key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
