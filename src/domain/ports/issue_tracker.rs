//! Issue tracker port.

use async_trait::async_trait;

use crate::domain::errors::TrackerResult;
use crate::domain::models::{CreateMeta, CreatedIssue, NewIssue, TemplateIssue};

/// The remote issue tracker calls the clone workflow needs.
///
/// Implementations report every non-success response as a
/// [`TrackerError`](crate::domain::errors::TrackerError) and never retry.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch creation metadata (with field definitions) for `issue_type`
    /// in `project_key`.
    async fn create_meta(&self, project_key: &str, issue_type: &str) -> TrackerResult<CreateMeta>;

    /// Create an issue.
    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue>;

    /// Run a query, returning matching issues with only `fields` populated.
    async fn search(&self, jql: &str, fields: &[&str]) -> TrackerResult<Vec<TemplateIssue>>;
}
