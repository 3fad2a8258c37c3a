//! Endpoint handlers.
//!
//! Search failures become 500s. An empty match set is a 404 on the two
//! `/employees` endpoints but a normal 200 on `/chat`.

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ChatRequest, ChatResponse, HealthResponse, HomeResponse, SkillQuery};
use axum::{
    extract::{Query, State},
    Json,
};
use hrbot_agent::recommend::no_match_message;
use hrbot_agent::RecommendationSource;
use hrbot_core::Employee;
use std::sync::Arc;
use tracing::info;

/// Fixed status line returned by `GET /`.
pub const HOME_MESSAGE: &str = "HR Resource Query Chatbot API is running";

/// Query text used to seed the availability listing.
pub const AVAILABLE_QUERY: &str = "available employees";

/// `GET /`
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: HOME_MESSAGE.to_string(),
    })
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.searcher.cache_stats();
    Json(HealthResponse {
        status: "ok".to_string(),
        employees: state.searcher.roster().len(),
        cached_queries: state.searcher.cached_queries(),
        cache_hits: stats.hits,
        cache_misses: stats.misses,
    })
}

/// Search text for a skill filter. A missing skill searches generically.
pub fn skill_query(skill: Option<&str>) -> String {
    match skill {
        Some(s) => format!("Find employees with {}", s),
        None => "Find employees".to_string(),
    }
}

/// `GET /employees/search?skill=`
pub async fn search_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SkillQuery>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    if let Some(skill) = &params.skill {
        if skill.trim().is_empty() {
            return Err(ApiError::BadRequest("Skill parameter cannot be empty.".to_string()));
        }
    }

    let query = skill_query(params.skill.as_deref());
    let matches = state
        .searcher
        .search(&query)
        .await
        .map_err(|e| ApiError::Internal(format!("Search failed: {}", e)))?;

    if matches.is_empty() {
        return Err(ApiError::NotFound(
            "No employees found matching the query.".to_string(),
        ));
    }

    info!(query = %query, matches = matches.len(), "Skill search served");
    Ok(Json(matches.to_vec()))
}

/// `GET /employees/available`
///
/// Filters the top matches for "available employees" down to those whose
/// availability is exactly `available`. The filtered list may be empty.
pub async fn available_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let matches = state.searcher.search(AVAILABLE_QUERY).await.map_err(|e| {
        ApiError::Internal(format!("Failed to fetch available employees: {}", e))
    })?;

    if matches.is_empty() {
        return Err(ApiError::NotFound("No available employees found.".to_string()));
    }

    let available: Vec<Employee> = matches
        .iter()
        .filter(|e| e.is_available())
        .cloned()
        .collect();

    info!(
        matches = matches.len(),
        available = available.len(),
        "Availability listing served"
    );
    Ok(Json(available))
}

/// `POST /chat`
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty.".to_string()));
    }

    let matches = state
        .searcher
        .search(&request.query)
        .await
        .map_err(|e| ApiError::Internal(format!("Employee search failed: {}", e)))?;

    if matches.is_empty() {
        return Ok(Json(ChatResponse {
            response: no_match_message(&request.query),
            results: Vec::new(),
            source: RecommendationSource::NoMatches,
        }));
    }

    let recommendation = state.generator.generate(&request.query, &matches).await;
    let source = recommendation.source();
    info!(matches = matches.len(), source = ?source, "Chat answered");

    Ok(Json(ChatResponse {
        response: recommendation.into_text(),
        results: matches.to_vec(),
        source,
    }))
}
