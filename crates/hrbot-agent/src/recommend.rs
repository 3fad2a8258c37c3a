//! HR recommendation text for a query and its matched employees.
//!
//! [`ResponseGenerator::generate`] never fails: when the model call errors or
//! times out the caller gets [`Recommendation::Fallback`] carrying a
//! deterministic template and the reason the model path was abandoned.

use crate::llm::LlmClient;
use hrbot_core::{Employee, Message};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// System prompt sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an expert HR assistant.";

/// Closing question appended to the fallback template.
pub const FOLLOW_UP: &str = "Would you like me to check their availability for a meeting?";

/// Which path produced a [`Recommendation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// The language model wrote the text.
    Model,
    /// The deterministic template was used after a model failure.
    Fallback,
    /// Nothing matched; no model call was made.
    NoMatches,
}

/// Result of [`ResponseGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// No employees matched the query.
    NoMatches {
        /// Fixed message quoting the query.
        text: String,
    },
    /// The language model replied.
    Generated {
        /// Model reply, trimmed.
        text: String,
    },
    /// The language model call failed and the template was used.
    Fallback {
        /// Template text listing every matched employee.
        text: String,
        /// Why the model path failed.
        reason: String,
    },
}

impl Recommendation {
    /// The user-facing text.
    pub fn text(&self) -> &str {
        match self {
            Recommendation::NoMatches { text }
            | Recommendation::Generated { text }
            | Recommendation::Fallback { text, .. } => text,
        }
    }

    /// Consume into the user-facing text.
    pub fn into_text(self) -> String {
        match self {
            Recommendation::NoMatches { text }
            | Recommendation::Generated { text }
            | Recommendation::Fallback { text, .. } => text,
        }
    }

    /// Which path produced this recommendation.
    pub fn source(&self) -> RecommendationSource {
        match self {
            Recommendation::NoMatches { .. } => RecommendationSource::NoMatches,
            Recommendation::Generated { .. } => RecommendationSource::Model,
            Recommendation::Fallback { .. } => RecommendationSource::Fallback,
        }
    }

    /// Whether the template fallback was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Recommendation::Fallback { .. })
    }
}

/// Turns search matches into a recommendation via the language model.
pub struct ResponseGenerator {
    client: LlmClient,
    timeout: Duration,
}

impl ResponseGenerator {
    /// `timeout` bounds the whole model call; exceeding it triggers the fallback.
    pub fn new(client: LlmClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Produce a recommendation. Exactly one model call when `employees` is
    /// non-empty, none otherwise. No retries.
    pub async fn generate(&self, query: &str, employees: &[Employee]) -> Recommendation {
        if employees.is_empty() {
            return Recommendation::NoMatches {
                text: no_match_message(query),
            };
        }

        let messages = [Message::user(build_prompt(query, employees))];
        let outcome = tokio::time::timeout(
            self.timeout,
            self.client.chat(Some(SYSTEM_PROMPT), &messages),
        )
        .await;

        let reason = match outcome {
            Ok(Ok(text)) => {
                info!(matches = employees.len(), "Recommendation generated by model");
                return Recommendation::Generated { text };
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!("model call timed out after {}s", self.timeout.as_secs_f32()),
        };

        warn!(reason = %reason, "Model call failed, using template");
        Recommendation::Fallback {
            text: fallback_template(query, employees),
            reason,
        }
    }
}

/// Message returned when nothing matched.
pub fn no_match_message(query: &str) -> String {
    format!("No suitable employees found for query: '{}'.", query)
}

/// One line per employee as embedded in the model prompt.
pub fn candidate_summary(employees: &[Employee]) -> String {
    employees
        .iter()
        .map(|e| {
            format!(
                "- {} ({} yrs) | Skills: {} | Projects: {} | Availability: {}",
                e.name,
                e.experience_years,
                e.skills.join(", "),
                e.projects.join(", "),
                e.availability
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User prompt for the model.
pub fn build_prompt(query: &str, employees: &[Employee]) -> String {
    format!(
        "You are an HR assistant. A user asked: \"{}\"\n\
         Here are potential employees:\n\
         {}\n\
         Write a friendly and professional HR recommendation message.",
        query,
        candidate_summary(employees)
    )
}

/// Deterministic text used when the model call fails.
pub fn fallback_template(query: &str, employees: &[Employee]) -> String {
    let lines = employees
        .iter()
        .map(|e| {
            format!(
                "- {} ({} yrs experience), Skills: {}, Projects: {}, Availability: {}",
                e.name,
                e.experience_years,
                e.skills.join(", "),
                e.projects.join(", "),
                e.availability
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on your query '{}', here are the top matches:\n{}\n{}",
        query, lines, FOLLOW_UP
    )
}
