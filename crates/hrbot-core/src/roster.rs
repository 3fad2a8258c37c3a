use crate::employee::Employee;
use crate::error::{HrError, HrResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// On-disk document shape: `{ "employees": [ ... ] }`.
#[derive(Deserialize)]
struct RosterDocument {
    employees: Vec<Employee>,
}

/// The immutable set of employees loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Load the roster from a JSON file.
    ///
    /// A missing file, malformed JSON, or duplicate ids are fatal; there is no
    /// partial load.
    pub async fn load(path: impl AsRef<Path>) -> HrResult<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read_to_string(path).await.map_err(|e| {
            HrError::Dataset(format!("Failed to read roster '{}': {}", path.display(), e))
        })?;
        let roster = Self::from_json(&data)?;
        info!(path = %path.display(), employees = roster.len(), "Roster loaded");
        Ok(roster)
    }

    /// Parse a roster from a JSON document.
    pub fn from_json(data: &str) -> HrResult<Self> {
        let doc: RosterDocument = serde_json::from_str(data)
            .map_err(|e| HrError::Dataset(format!("Invalid roster document: {}", e)))?;
        Self::from_employees(doc.employees)
    }

    /// Build a roster from records, rejecting duplicate ids.
    pub fn from_employees(employees: Vec<Employee>) -> HrResult<Self> {
        let mut seen = HashSet::with_capacity(employees.len());
        for employee in &employees {
            if !seen.insert(employee.id) {
                return Err(HrError::Dataset(format!(
                    "Duplicate employee id {}",
                    employee.id
                )));
            }
        }
        if employees.is_empty() {
            warn!("Roster is empty; every search will return no matches");
        }
        Ok(Self { employees })
    }

    /// All employees in roster order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Employee at a roster position (the position used by the index).
    pub fn get(&self, position: usize) -> Option<&Employee> {
        self.employees.get(position)
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the roster has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
