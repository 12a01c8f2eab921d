//! JSON-backed role catalog.
//!
//! The catalog document has the shape
//! `{"roles": {"<key>": {name?, display_name?, questions, evaluation_criteria}}}`.

use mockview_core::role::{Role, RoleProvider, display_name_from_key};
use mockview_core::{InterviewError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_ROLES: &str = include_str!("../assets/roles.json");

#[derive(Deserialize)]
struct CatalogDocument {
    roles: BTreeMap<String, RoleEntry>,
}

#[derive(Deserialize)]
struct RoleEntry {
    name: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    questions: Vec<String>,
    #[serde(default)]
    evaluation_criteria: BTreeMap<String, serde_json::Value>,
}

impl RoleEntry {
    fn into_role(self, key: &str) -> Role {
        Role {
            name: self.name.unwrap_or_else(|| key.to_string()),
            display_name: self
                .display_name
                .unwrap_or_else(|| display_name_from_key(key)),
            questions: self.questions,
            evaluation_criteria: self.evaluation_criteria,
        }
    }
}

/// An immutable set of validated roles, keyed by catalog key.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: BTreeMap<String, Role>,
}

impl RoleCatalog {
    /// Parses and validates a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the JSON is malformed, the catalog is empty, or
    /// any role fails validation. One bad role fails the whole load.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(content).map_err(|e| {
            InterviewError::config(format!("Invalid JSON in role configuration: {e}"))
        })?;

        let mut roles = BTreeMap::new();
        for (key, entry) in document.roles {
            let role = entry.into_role(&key);
            role.validate()?;
            roles.insert(key, role);
        }

        if roles.is_empty() {
            return Err(InterviewError::config(
                "No valid roles found in configuration",
            ));
        }

        Ok(Self { roles })
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InterviewError::config(format!(
                "Failed to read role configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} roles from {}",
            catalog.roles.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_ROLES)
    }

    /// Loads `path` when given, the built-in catalog otherwise.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl RoleProvider for RoleCatalog {
    fn get_role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    fn list_role_names(&self) -> Vec<String> {
        // BTreeMap keys are already sorted
        self.roles.keys().cloned().collect()
    }
}
