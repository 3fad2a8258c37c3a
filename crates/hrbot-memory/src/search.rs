use crate::cache::{CacheStats, QueryCache, DEFAULT_CACHE_CAPACITY};
use crate::embedding::EmbeddingProvider;
use crate::index::FlatL2Index;
use hrbot_core::{Employee, HrError, HrResult, Roster};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered, shared search result. Cheap to clone out of the cache.
pub type Matches = Arc<[Employee]>;

/// Search settings from the `[search]` config table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Matches returned when the caller does not ask for a specific count.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Distinct queries memoized before LRU eviction.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_top_k() -> usize {
    3
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// An employee with its distance from the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredEmployee {
    /// The matched record.
    pub employee: Employee,
    /// Squared Euclidean distance. Smaller is a better match.
    pub distance: f32,
}

/// Semantic employee search over an immutable roster.
///
/// Built once at startup: every employee's profile text is embedded and added
/// to a [`FlatL2Index`] in roster order. Queries are memoized by exact text and
/// `top_k`.
pub struct EmployeeSearcher {
    roster: Roster,
    index: FlatL2Index,
    embedder: Arc<dyn EmbeddingProvider>,
    cache: QueryCache<(String, usize), Matches>,
    default_top_k: usize,
}

impl EmployeeSearcher {
    /// Embed the roster and build the index.
    pub async fn build(
        roster: Roster,
        embedder: Arc<dyn EmbeddingProvider>,
        config: &SearchConfig,
    ) -> HrResult<Self> {
        let texts: Vec<String> = roster.employees().iter().map(Employee::profile_text).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        let vectors = if refs.is_empty() {
            Vec::new()
        } else {
            embedder.embed_batch(&refs).await?
        };
        if vectors.len() != roster.len() {
            return Err(HrError::Index(format!(
                "Embedded {} of {} employees",
                vectors.len(),
                roster.len()
            )));
        }

        let mut index = FlatL2Index::new(embedder.dimension());
        for vector in vectors {
            index.add(vector)?;
        }

        info!(
            employees = index.len(),
            dimension = index.dimension(),
            cache_capacity = config.cache_capacity,
            "Employee index built"
        );

        Ok(Self {
            roster,
            index,
            embedder,
            cache: QueryCache::new(config.cache_capacity),
            default_top_k: config.top_k,
        })
    }

    /// Search with the configured default `top_k`.
    pub async fn search(&self, query: &str) -> HrResult<Matches> {
        self.search_top_k(query, self.default_top_k).await
    }

    /// Return up to `top_k` employees, best match first.
    ///
    /// Identical query text (including whitespace) with the same `top_k` is
    /// served from the cache; concurrent identical queries embed once.
    pub async fn search_top_k(&self, query: &str, top_k: usize) -> HrResult<Matches> {
        self.cache
            .get_or_try_insert_with((query.to_string(), top_k), || async {
                let scored = self.search_scored(query, top_k).await?;
                let matches: Matches = scored.into_iter().map(|s| s.employee).collect();
                Ok(matches)
            })
            .await
    }

    /// Uncached search that also reports distances.
    pub async fn search_scored(&self, query: &str, top_k: usize) -> HrResult<Vec<ScoredEmployee>> {
        let vector = self.embedder.embed(query).await?;
        let neighbors = self.index.search(&vector, top_k)?;
        debug!(query = %query, top_k, hits = neighbors.len(), "Index searched");

        neighbors
            .into_iter()
            .map(|n| {
                let employee = self.roster.get(n.position).cloned().ok_or_else(|| {
                    HrError::Search(format!("Index position {} outside roster", n.position))
                })?;
                Ok(ScoredEmployee {
                    employee,
                    distance: n.distance,
                })
            })
            .collect()
    }

    /// The roster this searcher was built from.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Default number of matches.
    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Number of memoized queries.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    /// Cache hit/miss counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
