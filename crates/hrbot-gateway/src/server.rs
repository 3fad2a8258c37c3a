use crate::routes::{available_employees, chat, health, home, search_employees};
use crate::ui::ui_handler;
use axum::{
    routing::{get, post},
    Router,
};
use hrbot_agent::ResponseGenerator;
use hrbot_memory::EmployeeSearcher;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    /// Semantic search over the loaded roster.
    pub searcher: Arc<EmployeeSearcher>,
    /// Recommendation text for `/chat`.
    pub generator: Arc<ResponseGenerator>,
}

impl AppState {
    /// Bundle the search and generation services.
    pub fn new(searcher: Arc<EmployeeSearcher>, generator: Arc<ResponseGenerator>) -> Self {
        Self {
            searcher,
            generator,
        }
    }
}

/// The HTTP API server.
pub struct GatewayServer;

impl GatewayServer {
    /// Build the router with every endpoint and request tracing.
    pub fn build(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(home))
            .route("/health", get(health))
            .route("/ui", get(ui_handler))
            .route("/employees/search", get(search_employees))
            .route("/employees/available", get(available_employees))
            .route("/chat", post(chat))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
