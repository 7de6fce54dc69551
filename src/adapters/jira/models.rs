//! Jira API request and response models.
//!
//! These structs map to the Jira Cloud REST API v3 JSON payloads. They are
//! used internally by the Jira adapter and converted to domain types at
//! the client boundary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::models::{IssueTypeRef, NewIssue, TemplateIssue};

/// Request body for `POST /issue`.
///
/// `fields` is a free-form map because the epic name lives under a
/// site-specific custom field id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraCreateIssueRequest {
    pub fields: Map<String, Value>,
}

impl From<&NewIssue> for JiraCreateIssueRequest {
    fn from(issue: &NewIssue) -> Self {
        let mut fields = Map::new();
        fields.insert("summary".to_string(), Value::String(issue.summary.clone()));
        let issuetype = match &issue.issue_type {
            IssueTypeRef::Id(id) => json!({ "id": id }),
            IssueTypeRef::Name(name) => json!({ "name": name }),
        };
        fields.insert("issuetype".to_string(), issuetype);
        fields.insert("project".to_string(), json!({ "key": issue.project_key }));
        if let Some(parent_key) = &issue.parent_key {
            fields.insert("parent".to_string(), json!({ "key": parent_key }));
        }
        for (field_id, value) in &issue.custom_fields {
            fields.insert(field_id.clone(), value.clone());
        }
        Self { fields }
    }
}

/// Response wrapper for `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraSearchResponse {
    /// Matching issues. Absent when the query matched nothing on some
    /// deployments.
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// An issue returned by search, projected to summary and issue type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueFields {
    pub summary: String,
    pub issuetype: JiraIssueType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueType {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<JiraIssue> for TemplateIssue {
    fn from(issue: JiraIssue) -> Self {
        Self {
            id: issue.id,
            key: issue.key,
            summary: issue.fields.summary,
            issue_type_id: issue.fields.issuetype.id,
            issue_type_name: issue.fields.issuetype.name,
        }
    }
}
