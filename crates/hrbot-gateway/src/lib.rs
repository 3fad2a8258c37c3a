//! HTTP API for the hrbot employee search and recommendation service.
//!
//! # Endpoints
//!
//! - `GET /` fixed status message.
//! - `GET /health` roster size and query cache counters.
//! - `GET /ui` browser chat client.
//! - `GET /employees/search?skill=` semantic search by skill.
//! - `GET /employees/available` available employees among the top matches.
//! - `POST /chat` search plus a generated recommendation.

/// JSON error responses.
pub mod error;
/// Endpoint handlers.
pub mod routes;
/// Router construction and shared state.
pub mod server;
/// Request and response bodies.
pub mod types;
/// Browser chat client.
pub mod ui;

pub use error::ApiError;
pub use server::{AppState, GatewayServer};
pub use types::{ChatRequest, ChatResponse, HealthResponse, HomeResponse};
