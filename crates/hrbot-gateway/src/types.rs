use hrbot_agent::RecommendationSource;
use hrbot_core::Employee;
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    /// Free-text question; must be non-blank.
    pub query: String,
}

/// Reply to `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Recommendation text.
    pub response: String,
    /// Matched employees, best first. Empty when nothing matched.
    pub results: Vec<Employee>,
    /// Which generation path produced `response`.
    pub source: RecommendationSource,
}

/// Reply to `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    /// Fixed status line.
    pub message: String,
}

/// Query string of `GET /employees/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SkillQuery {
    /// Skill term; blank is rejected when present.
    pub skill: Option<String>,
}

/// Reply to `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Roster size.
    pub employees: usize,
    /// Distinct queries currently memoized.
    pub cached_queries: usize,
    /// Cache hits since startup.
    pub cache_hits: u64,
    /// Cache misses since startup.
    pub cache_misses: u64,
}
