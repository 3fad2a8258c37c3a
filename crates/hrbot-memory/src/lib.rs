//! Semantic employee search for hrbot.
//!
//! Embeds every roster entry once at startup, keeps the vectors in an exact
//! flat L2 index, and memoizes query results in a fixed-capacity LRU cache
//! with a single-flight guard per query.
//!
//! # Main types
//!
//! - [`EmbeddingProvider`]: Trait for computing text embeddings.
//! - [`LocalEmbedding`]: Local hashed bag-of-words embedding provider.
//! - [`HttpEmbedding`]: OpenAI-compatible remote embeddings (feature `http-embeddings`).
//! - [`FlatL2Index`]: Brute-force Euclidean nearest-neighbor index.
//! - [`QueryCache`]: LRU memoization computing each key at most once.
//! - [`EmployeeSearcher`]: Roster + index + cache behind one `search` call.

/// Query memoization.
pub mod cache;
/// Embedding provider trait and implementations.
pub mod embedding;
/// Remote embedding provider.
#[cfg(feature = "http-embeddings")]
pub mod http;
/// Flat similarity index.
pub mod index;
/// Employee search.
pub mod search;

pub use cache::{CacheStats, QueryCache};
pub use embedding::{EmbeddingBackend, EmbeddingConfig, EmbeddingProvider, LocalEmbedding};
#[cfg(feature = "http-embeddings")]
pub use http::HttpEmbedding;
pub use index::{FlatL2Index, Neighbor};
pub use search::{EmployeeSearcher, Matches, ScoredEmployee, SearchConfig};
