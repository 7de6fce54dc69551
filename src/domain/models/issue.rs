//! Issue records exchanged with the issue tracker.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Issue type name used for epics.
pub const EPIC_ISSUE_TYPE: &str = "Epic";

/// How a new issue names its type: by provider id or by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTypeRef {
    Id(String),
    Name(String),
}

/// A child issue of a template epic, as returned by a child query.
///
/// Read-only: the cloner copies `summary` and `issue_type_id` from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateIssue {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub issue_type_id: String,
    #[serde(default)]
    pub issue_type_name: Option<String>,
}

/// An issue to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    pub issue_type: IssueTypeRef,
    /// Key of the parent epic, if the issue is attached to one.
    #[serde(default)]
    pub parent_key: Option<String>,
    /// Extra provider fields keyed by field id (e.g. the Epic Name custom field).
    #[serde(default)]
    pub custom_fields: BTreeMap<String, Value>,
}

impl NewIssue {
    /// An epic in `draft.project_key`, with its epic name written to
    /// `epic_name_field`.
    pub fn epic(draft: &EpicDraft, epic_name_field: &str) -> Self {
        let mut custom_fields = BTreeMap::new();
        custom_fields.insert(
            epic_name_field.to_string(),
            Value::String(draft.epic_name().to_string()),
        );
        Self {
            project_key: draft.project_key.clone(),
            summary: draft.summary.clone(),
            issue_type: IssueTypeRef::Name(EPIC_ISSUE_TYPE.to_string()),
            parent_key: None,
            custom_fields,
        }
    }

    /// A copy of `template` in `project_key`, attached to `parent_epic_key`.
    pub fn child_of(project_key: &str, parent_epic_key: &str, template: &TemplateIssue) -> Self {
        Self {
            project_key: project_key.to_string(),
            summary: template.summary.clone(),
            issue_type: IssueTypeRef::Id(template.issue_type_id.clone()),
            parent_key: Some(parent_epic_key.to_string()),
            custom_fields: BTreeMap::new(),
        }
    }
}

/// Record returned by the tracker after a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

/// Inputs for a new epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicDraft {
    pub summary: String,
    pub project_key: String,
    /// Epic Name value; the summary is used when absent or blank.
    pub epic_name: Option<String>,
}

impl EpicDraft {
    pub fn new(summary: impl Into<String>, project_key: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            project_key: project_key.into(),
            epic_name: None,
        }
    }

    #[must_use]
    pub fn with_epic_name(mut self, epic_name: impl Into<String>) -> Self {
        self.epic_name = Some(epic_name.into());
        self
    }

    pub fn epic_name(&self) -> &str {
        self.epic_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.summary)
    }
}

/// Issue creation metadata for one or more projects.
///
/// Decoding never fails on shape: a level that is missing, `null` or of
/// another type reads as empty, so an unexpected provider response
/// degrades to "no fields found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMeta {
    /// Projects in response order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub projects: Vec<ProjectMeta>,
}

impl CreateMeta {
    /// Read metadata out of an arbitrary JSON response.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Creation metadata for one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMeta {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub issuetypes: Vec<IssueTypeMeta>,
}

/// Creation metadata for one issue type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeMeta {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Field definitions keyed by field id, in response order.
    #[serde(default, deserialize_with = "lenient")]
    pub fields: Map<String, Value>,
}

impl IssueTypeMeta {
    /// `(field id, display name)` for each definition that is an object
    /// with a string `name`, in response order.
    pub fn named_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(id, definition)| {
            definition
                .get("name")
                .and_then(Value::as_str)
                .map(|name| (id.as_str(), name))
        })
    }
}

/// Decode `T`, or its default when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list, dropping elements that do not decode as `T`. Anything
/// other than an array reads as empty.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
