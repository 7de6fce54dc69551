//! Clone request and outcome.

use serde::{Deserialize, Serialize};

use crate::domain::errors::CloneError;

/// A request to clone a template epic into a target project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneRequest {
    /// Key of the epic whose children are copied
    pub template_epic_key: String,
    /// Project the new epic and its children are created in
    pub target_project_key: String,
    /// Summary of the new epic
    pub new_epic_summary: String,
}

impl CloneRequest {
    pub fn new(
        template_epic_key: impl Into<String>,
        target_project_key: impl Into<String>,
        new_epic_summary: impl Into<String>,
    ) -> Self {
        Self {
            template_epic_key: template_epic_key.into(),
            target_project_key: target_project_key.into(),
            new_epic_summary: new_epic_summary.into(),
        }
    }

    /// Reject requests with a blank field, naming each blank field by its
    /// wire name.
    pub fn validate(&self) -> Result<(), CloneError> {
        let missing: Vec<&'static str> = [
            ("templateEpicKey", &self.template_epic_key),
            ("targetProjectKey", &self.target_project_key),
            ("newEpicSummary", &self.new_epic_summary),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CloneError::MissingFields(missing))
        }
    }
}

/// Result of a successful clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneOutcome {
    /// Key of the created epic
    pub new_epic_key: String,
    /// Keys of the created children, in the order the template children
    /// were returned.
    pub created_children: Vec<String>,
}
