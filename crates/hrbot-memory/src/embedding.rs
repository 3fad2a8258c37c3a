use async_trait::async_trait;
use hrbot_core::{HrError, HrResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for computing text embeddings (vector representations).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Compute embedding vector for a single text.
    async fn embed(&self, text: &str) -> HrResult<Vec<f32>>;

    /// Compute embeddings for a batch of texts.
    async fn embed_batch(&self, texts: &[&str]) -> HrResult<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Dimension of the embedding vectors produced by this provider.
    fn dimension(&self) -> usize;
}

/// Which embedding model backs the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// In-process hashed bag-of-words; no network.
    #[default]
    Local,
    /// OpenAI-compatible `/v1/embeddings` endpoint.
    OpenAi,
}

/// Embedding settings from the `[embedding]` config table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Backend that computes the vectors.
    #[serde(default)]
    pub provider: EmbeddingBackend,
    /// Vector length; must match what the remote model returns.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Remote model name.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Bearer key for the remote provider; resolved from the environment when blank.
    #[serde(default)]
    pub api_key: String,
    /// Overrides the default `https://api.openai.com`.
    pub api_base_url: Option<String>,
    /// Request timeout for the remote provider.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_dimension() -> usize {
    384
}

fn default_model_id() -> String {
    "text-embedding-3-small".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::default(),
            dimension: default_dimension(),
            model_id: default_model_id(),
            api_key: String::new(),
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Base URL of the remote embedding API.
    pub fn base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.openai.com")
    }

    /// Instantiate the configured provider.
    pub fn build_provider(&self) -> HrResult<Arc<dyn EmbeddingProvider>> {
        if self.dimension == 0 {
            return Err(HrError::Config(
                "embedding dimension must be greater than zero".to_string(),
            ));
        }
        match self.provider {
            EmbeddingBackend::Local => Ok(Arc::new(LocalEmbedding::new(self.dimension))),
            #[cfg(feature = "http-embeddings")]
            EmbeddingBackend::OpenAi => Ok(Arc::new(crate::http::HttpEmbedding::new(
                self.clone(),
            )?)),
            #[cfg(not(feature = "http-embeddings"))]
            EmbeddingBackend::OpenAi => Err(HrError::Config(
                "remote embeddings require the `http-embeddings` feature".to_string(),
            )),
        }
    }
}

/// Local bag-of-words embedding (no external API needed).
/// Uses TF-based sparse-to-dense mapping with a fixed dimension.
pub struct LocalEmbedding {
    dimension: usize,
}

impl LocalEmbedding {
    /// Create an embedder producing vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for LocalEmbedding {
    fn default() -> Self {
        Self::new(default_dimension())
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbedding {
    async fn embed(&self, text: &str) -> HrResult<Vec<f32>> {
        if text.is_empty() {
            return Err(HrError::Embedding("Cannot embed empty text".to_string()));
        }

        let mut vector = vec![0.0f32; self.dimension];

        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && w.len() > 1)
            .collect();

        let mut freq: HashMap<&str, f32> = HashMap::new();
        for word in &words {
            *freq.entry(word).or_insert(0.0) += 1.0;
        }

        let total = words.len() as f32;
        if total == 0.0 {
            return Ok(vector);
        }

        // Three hash positions per word spread collisions across dimensions
        for (word, count) in &freq {
            let tf = count / total;
            let hash1 = simple_hash(word.as_bytes()) as usize;
            let hash2 = simple_hash(&[word.as_bytes(), &[1u8]].concat()) as usize;
            let hash3 = simple_hash(&[word.as_bytes(), &[2u8]].concat()) as usize;

            vector[hash1 % self.dimension] += tf;
            vector[hash2 % self.dimension] += tf * 0.7;
            vector[hash3 % self.dimension] += tf * 0.5;
        }

        // L2 normalize
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// FNV-1a.
fn simple_hash(data: &[u8]) -> u32 {
    let mut hash: u32 = 2166136261;
    for &byte in data {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(16777619);
    }
    hash
}
