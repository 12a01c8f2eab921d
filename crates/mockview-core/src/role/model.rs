//! Role domain model.

use crate::error::{InterviewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum number of questions a role must define.
pub const MIN_QUESTIONS: usize = 8;

/// Evaluation-criteria keys every role must provide.
pub const REQUIRED_CRITERIA: [&str; 3] = ["communication", "technical_knowledge", "structure"];

/// A job archetype: its question bank and how answers are judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Internal identifier (e.g. `backend_engineer`)
    pub name: String,
    /// Human-readable name (e.g. `Backend Engineer`)
    pub display_name: String,
    /// Main questions in the order they are asked
    pub questions: Vec<String>,
    /// Free-form guidance keyed by evaluation dimension
    pub evaluation_criteria: BTreeMap<String, serde_json::Value>,
}

impl Role {
    /// Checks the structural requirements of a role.
    ///
    /// # Errors
    ///
    /// Returns `Config` naming the role if it has an empty name, fewer than
    /// [`MIN_QUESTIONS`] questions, a blank question, or is missing one of
    /// [`REQUIRED_CRITERIA`].
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(InterviewError::config("Role name cannot be empty"));
        }
        if self.questions.len() < MIN_QUESTIONS {
            return Err(InterviewError::config(format!(
                "Role '{}' must have at least {} questions, found {}",
                self.name,
                MIN_QUESTIONS,
                self.questions.len()
            )));
        }
        if let Some(index) = self.questions.iter().position(|q| q.trim().is_empty()) {
            return Err(InterviewError::config(format!(
                "Role '{}' has an empty question at position {}",
                self.name,
                index + 1
            )));
        }
        let missing: Vec<&str> = REQUIRED_CRITERIA
            .iter()
            .copied()
            .filter(|key| !self.evaluation_criteria.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(InterviewError::config(format!(
                "Role '{}' is missing evaluation criteria: {}",
                self.name,
                missing.join(", ")
            )));
        }
        Ok(())
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Returns the question at a 0-based index.
    pub fn question(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }
}

/// Turns `backend_engineer` into `Backend Engineer`.
pub fn display_name_from_key(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
