//! Domain models.

pub mod clone;
pub mod config;
pub mod issue;

pub use clone::{CloneOutcome, CloneRequest};
pub use config::{Config, JiraConfig, LogFormat, LoggingConfig, RotationPolicy, ServerConfig};
pub use issue::{
    CreateMeta, CreatedIssue, EpicDraft, IssueTypeMeta, IssueTypeRef, NewIssue, ProjectMeta,
    TemplateIssue, EPIC_ISSUE_TYPE,
};
