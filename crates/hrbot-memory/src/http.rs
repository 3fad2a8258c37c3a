use crate::embedding::{EmbeddingConfig, EmbeddingProvider};
use async_trait::async_trait;
use hrbot_core::{HrError, HrResult};
use std::time::Duration;
use tracing::debug;

/// OpenAI-compatible embeddings backend (`POST /v1/embeddings`).
pub struct HttpEmbedding {
    config: EmbeddingConfig,
    http: reqwest::Client,
}

impl HttpEmbedding {
    /// Create a client for the configured endpoint.
    pub fn new(config: EmbeddingConfig) -> HrResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HrError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    /// `dimensions` is only sent to models that accept it; older models such
    /// as `text-embedding-ada-002` reject the field.
    fn request_body(&self, texts: &[&str]) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model_id,
            "input": texts,
        });
        if accepts_dimensions(&self.config.model_id) {
            body["dimensions"] = serde_json::json!(self.config.dimension);
        }
        body
    }
}

/// Whether `model_id` supports shortening vectors via `dimensions`.
pub fn accepts_dimensions(model_id: &str) -> bool {
    model_id.starts_with("text-embedding-3")
}

#[async_trait]
impl EmbeddingProvider for HttpEmbedding {
    async fn embed(&self, text: &str) -> HrResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| HrError::Embedding("Empty embeddings response".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> HrResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if self.config.api_key.is_empty() {
            return Err(HrError::Embedding(
                "No API key configured for remote embeddings".to_string(),
            ));
        }

        let url = format!("{}/v1/embeddings", self.config.base_url());
        let body = self.request_body(texts);

        debug!(count = texts.len(), model = %self.config.model_id, "Requesting embeddings");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
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
                "Embedding API error {}: {}",
                status, resp_body
            )));
        }

        let vectors = parse_embeddings_response(&resp_body, texts.len())?;
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.config.dimension) {
            return Err(HrError::Embedding(format!(
                "Expected {}-dimensional embeddings, got {}",
                self.config.dimension,
                bad.len()
            )));
        }
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

/// Extract `data[*].embedding`, ordered by each item's `index`.
pub fn parse_embeddings_response(
    body: &serde_json::Value,
    expected: usize,
) -> HrResult<Vec<Vec<f32>>> {
    let data = body["data"]
        .as_array()
        .ok_or_else(|| HrError::Embedding("Response has no `data` array".to_string()))?;

    let mut indexed: Vec<(u64, Vec<f32>)> = Vec::with_capacity(data.len());
    for (position, item) in data.iter().enumerate() {
        let index = item["index"].as_u64().unwrap_or(position as u64);
        let values = item["embedding"]
            .as_array()
            .ok_or_else(|| HrError::Embedding("Item has no `embedding` array".to_string()))?;
        let vector = values
            .iter()
            .map(|v| v.as_f64().map(|f| f as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| HrError::Embedding("Non-numeric embedding value".to_string()))?;
        indexed.push((index, vector));
    }

    if indexed.len() != expected {
        return Err(HrError::Embedding(format!(
            "Expected {} embeddings, got {}",
            expected,
            indexed.len()
        )));
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, v)| v).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingBackend;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, key: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: EmbeddingBackend::OpenAi,
            dimension: 3,
            api_key: key.to_string(),
            api_base_url: Some(server.uri()),
            ..EmbeddingConfig::default()
        }
    }

    #[test]
    fn test_parse_reorders_by_index() {
        let body = serde_json::json!({
            "data": [
                {"index": 1, "embedding": [0.0, 1.0]},
                {"index": 0, "embedding": [1.0, 0.0]}
            ]
        });
        let vectors = parse_embeddings_response(&body, 2).unwrap();
        assert_eq!(vectors[0], vec![1.0, 0.0]);
        assert_eq!(vectors[1], vec![0.0, 1.0]);
    }

    #[test]
    fn test_dimensions_sent_only_to_supporting_models() {
        assert!(accepts_dimensions("text-embedding-3-small"));
        assert!(accepts_dimensions("text-embedding-3-large"));
        assert!(!accepts_dimensions("text-embedding-ada-002"));
        assert!(!accepts_dimensions("nomic-embed-text"));
    }

    #[tokio::test]
    async fn test_legacy_model_request_omits_dimensions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"index": 0, "embedding": [0.125, 0.25, 0.375]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let emb = HttpEmbedding::new(EmbeddingConfig {
            model_id: "text-embedding-ada-002".to_string(),
            ..config(&server, "sk-test")
        })
        .unwrap();
        emb.embed("alice").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "text-embedding-ada-002");
        assert!(body.get("dimensions").is_none());
    }

    #[tokio::test]
    async fn test_current_model_request_carries_dimensions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(body_partial_json(serde_json::json!({"dimensions": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"index": 0, "embedding": [0.125, 0.25, 0.375]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let emb = HttpEmbedding::new(config(&server, "sk-test")).unwrap();
        assert_eq!(emb.embed("alice").await.unwrap().len(), 3);
    }

    #[test]
    fn test_parse_count_mismatch() {
        let body = serde_json::json!({"data": [{"index": 0, "embedding": [1.0]}]});
        assert!(parse_embeddings_response(&body, 2).is_err());
    }

    #[test]
    fn test_parse_missing_data() {
        let body = serde_json::json!({"error": "nope"});
        assert!(parse_embeddings_response(&body, 1).is_err());
    }

    #[tokio::test]
    async fn test_embed_batch_against_mock() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"index": 0, "embedding": [0.125, 0.25, 0.375]},
                    {"index": 1, "embedding": [0.5, 0.625, 0.75]}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let emb = HttpEmbedding::new(config(&server, "sk-test")).unwrap();
        let vectors = emb.embed_batch(&["alice", "bob"]).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1], vec![0.5, 0.625, 0.75]);
    }

    #[tokio::test]
    async fn test_dimension_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"index": 0, "embedding": [0.1, 0.2]}]
            })))
            .mount(&server)
            .await;

        let emb = HttpEmbedding::new(config(&server, "sk-test")).unwrap();
        let err = emb.embed("alice").await.unwrap_err();
        assert!(matches!(err, HrError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "invalid key"})),
            )
            .mount(&server)
            .await;

        let emb = HttpEmbedding::new(config(&server, "sk-bad")).unwrap();
        let err = emb.embed("alice").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let emb = HttpEmbedding::new(config(&server, "")).unwrap();
        assert!(emb.embed("alice").await.is_err());
    }
}
