//! Startup: turn an [`HrbotConfig`] into the services the commands use.

use crate::config::HrbotConfig;
use hrbot_agent::{LlmClient, ResponseGenerator};
use hrbot_core::Roster;
use hrbot_gateway::AppState;
use hrbot_memory::{EmbeddingBackend, EmployeeSearcher};
use std::sync::Arc;
use tracing::{info, warn};

const EMBEDDING_KEY_ENV: &str = "OPENAI_API_KEY";

/// Load the roster, embed it and build the search index.
///
/// Fails when the roster is missing or malformed, or when embedding fails.
pub async fn build_searcher(config: &HrbotConfig) -> anyhow::Result<EmployeeSearcher> {
    let roster = Roster::load(&config.data_path).await?;

    let mut embedding = config.embedding.clone();
    if embedding.provider == EmbeddingBackend::OpenAi && embedding.api_key.is_empty() {
        if let Ok(key) = std::env::var(EMBEDDING_KEY_ENV) {
            embedding.api_key = key;
        }
    }
    let embedder = embedding.build_provider()?;

    Ok(EmployeeSearcher::build(roster, embedder, &config.search).await?)
}

/// Build the recommendation generator.
///
/// A missing API key is not fatal: every generation falls back to the template.
pub fn build_generator(config: &HrbotConfig) -> anyhow::Result<ResponseGenerator> {
    let mut model = config.model.clone();
    model.resolve_api_key();
    if !model.has_api_key() {
        warn!(
            env = model.provider.api_key_env(),
            "No model API key configured; recommendations will use the template"
        );
    }

    let timeout = model.timeout();
    info!(provider = ?model.provider, model = %model.model_id, "Language model configured");
    Ok(ResponseGenerator::new(LlmClient::new(model)?, timeout))
}

/// Everything `serve` and `ask` need.
pub async fn build_state(config: &HrbotConfig) -> anyhow::Result<AppState> {
    let searcher = build_searcher(config).await?;
    let generator = build_generator(config)?;
    Ok(AppState::new(Arc::new(searcher), Arc::new(generator)))
}
