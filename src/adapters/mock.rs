//! Mock issue tracker for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::errors::{TrackerError, TrackerResult};
use crate::domain::models::{
    CreateMeta, CreatedIssue, IssueTypeMeta, NewIssue, ProjectMeta, TemplateIssue,
};
use crate::domain::ports::IssueTracker;

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCall {
    CreateMeta {
        project_key: String,
        issue_type: String,
    },
    CreateIssue(NewIssue),
    Search {
        jql: String,
        fields: Vec<String>,
    },
}

#[derive(Debug, Default)]
struct MockState {
    meta: HashMap<String, CreateMeta>,
    search_results: HashMap<String, Vec<TemplateIssue>>,
    search_failures: HashMap<String, TrackerError>,
    meta_failure: Option<TrackerError>,
    /// 1-based index of the `create_issue` call that fails.
    create_failure: Option<(usize, TrackerError)>,
    created: usize,
    calls: Vec<TrackerCall>,
}

/// Scripted in-memory [`IssueTracker`].
///
/// Created issues get keys `<PROJECT>-<n>` numbered from 100. Queries with
/// no scripted result return no issues; projects with no scripted
/// metadata return empty metadata.
#[derive(Debug, Default)]
pub struct MockIssueTracker {
    state: Mutex<MockState>,
}

impl MockIssueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve metadata for `project_key` whose Epic type has a field `field_id`
    /// labelled `field_name`.
    #[must_use]
    pub fn with_epic_field(mut self, project_key: &str, field_id: &str, field_name: &str) -> Self {
        let mut issue_type = IssueTypeMeta {
            id: Some("10000".to_string()),
            name: "Epic".to_string(),
            ..IssueTypeMeta::default()
        };
        issue_type.fields.insert(
            field_id.to_string(),
            serde_json::json!({ "name": field_name, "required": true }),
        );
        let meta = CreateMeta {
            projects: vec![ProjectMeta {
                key: Some(project_key.to_string()),
                issuetypes: vec![issue_type],
            }],
        };
        self.state.get_mut().meta.insert(project_key.to_string(), meta);
        self
    }

    /// Return `issues` for the exact query `jql`.
    #[must_use]
    pub fn with_search_results(mut self, jql: &str, issues: Vec<TemplateIssue>) -> Self {
        self.state
            .get_mut()
            .search_results
            .insert(jql.to_string(), issues);
        self
    }

    #[must_use]
    pub fn failing_search(mut self, jql: &str, error: TrackerError) -> Self {
        self.state
            .get_mut()
            .search_failures
            .insert(jql.to_string(), error);
        self
    }

    #[must_use]
    pub fn failing_create_meta(mut self, error: TrackerError) -> Self {
        self.state.get_mut().meta_failure = Some(error);
        self
    }

    /// Fail the `n`-th `create_issue` call (1-based).
    #[must_use]
    pub fn failing_create_issue_at(mut self, n: usize, error: TrackerError) -> Self {
        self.state.get_mut().create_failure = Some((n, error));
        self
    }

    /// All calls received so far.
    pub async fn calls(&self) -> Vec<TrackerCall> {
        self.state.lock().await.calls.clone()
    }

    /// Issues passed to `create_issue`, including the one that failed.
    pub async fn created_issues(&self) -> Vec<NewIssue> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                TrackerCall::CreateIssue(issue) => Some(issue),
                _ => None,
            })
            .collect()
    }

    /// Queries passed to `search`, in order.
    pub async fn searches(&self) -> Vec<String> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                TrackerCall::Search { jql, .. } => Some(jql),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl IssueTracker for MockIssueTracker {
    async fn create_meta(&self, project_key: &str, issue_type: &str) -> TrackerResult<CreateMeta> {
        let mut state = self.state.lock().await;
        state.calls.push(TrackerCall::CreateMeta {
            project_key: project_key.to_string(),
            issue_type: issue_type.to_string(),
        });
        if let Some(error) = &state.meta_failure {
            return Err(error.clone());
        }
        Ok(state.meta.get(project_key).cloned().unwrap_or_default())
    }

    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
        let mut state = self.state.lock().await;
        state.calls.push(TrackerCall::CreateIssue(issue.clone()));
        state.created += 1;
        let n = state.created;
        if let Some((fail_at, error)) = &state.create_failure {
            if *fail_at == n {
                return Err(error.clone());
            }
        }
        let number = 99 + n;
        Ok(CreatedIssue {
            id: (20_000 + n).to_string(),
            key: format!("{}-{number}", issue.project_key),
            self_url: None,
        })
    }

    async fn search(&self, jql: &str, fields: &[&str]) -> TrackerResult<Vec<TemplateIssue>> {
        let mut state = self.state.lock().await;
        state.calls.push(TrackerCall::Search {
            jql: jql.to_string(),
            fields: fields.iter().map(ToString::to_string).collect(),
        });
        if let Some(error) = state.search_failures.get(jql) {
            return Err(error.clone());
        }
        Ok(state.search_results.get(jql).cloned().unwrap_or_default())
    }
}
