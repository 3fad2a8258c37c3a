use serde::{Deserialize, Serialize};

/// Availability value that marks an employee as free for new work.
pub const AVAILABLE: &str = "available";

/// A single employee record from the roster.
///
/// Records are immutable after load and serialize to the same JSON shape the
/// HTTP API returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier within the roster.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Skills in roster order.
    pub skills: Vec<String>,
    /// Years of professional experience.
    pub experience_years: u32,
    /// Past projects in roster order.
    pub projects: Vec<String>,
    /// Free-text availability, normally `available` or `unavailable`.
    pub availability: String,
}

impl Employee {
    /// Returns `true` when `availability` equals `"available"`, ignoring case.
    ///
    /// This is an exact comparison: `"unavailable"` is not available.
    pub fn is_available(&self) -> bool {
        self.availability.to_lowercase() == AVAILABLE
    }

    /// Descriptive text fed to the embedding model.
    pub fn profile_text(&self) -> String {
        format!(
            "{} with skills {}, {} years experience, projects: {}, availability: {}",
            self.name,
            self.skills.join(", "),
            self.experience_years,
            self.projects.join(", "),
            self.availability
        )
    }
}
