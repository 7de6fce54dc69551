//! Child issue lookup for a template epic.
//!
//! Team-managed and company-managed projects link children to an epic
//! differently, so the lookup tries an ordered list of query dialects and
//! keeps the first one that finds anything.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::TrackerResult;
use crate::domain::models::TemplateIssue;
use crate::domain::ports::IssueTracker;

/// Fields requested for each child.
pub const CHILD_FIELDS: [&str; 2] = ["summary", "issuetype"];

/// A query phrasing for "issues whose parent is this epic".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildQueryDialect {
    /// `parentEpic = KEY`
    ParentEpic,
    /// `"Epic Link" = KEY`, for projects still using the legacy field
    EpicLink,
}

impl ChildQueryDialect {
    /// Dialects in the order they are tried.
    pub const ORDERED: [Self; 2] = [Self::ParentEpic, Self::EpicLink];

    pub fn jql(self, epic_key: &str) -> String {
        match self {
            Self::ParentEpic => parent_epic_jql(epic_key),
            Self::EpicLink => epic_link_jql(epic_key),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParentEpic => "parent_epic",
            Self::EpicLink => "epic_link",
        }
    }
}

impl fmt::Display for ChildQueryDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parent_epic_jql(epic_key: &str) -> String {
    format!("parentEpic = {epic_key}")
}

pub fn epic_link_jql(epic_key: &str) -> String {
    format!("\"Epic Link\" = {epic_key}")
}

/// Fetches the children of a template epic.
#[derive(Clone)]
pub struct ChildFetcher {
    tracker: Arc<dyn IssueTracker>,
    dialects: Vec<ChildQueryDialect>,
}

impl ChildFetcher {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self::with_dialects(tracker, ChildQueryDialect::ORDERED.to_vec())
    }

    pub fn with_dialects(tracker: Arc<dyn IssueTracker>, dialects: Vec<ChildQueryDialect>) -> Self {
        Self { tracker, dialects }
    }

    /// Children of `epic_key` from the first dialect with a non-empty result.
    ///
    /// An empty result from every dialect is an empty list. A failed query
    /// is returned immediately without trying the remaining dialects.
    pub async fn fetch_children(&self, epic_key: &str) -> TrackerResult<Vec<TemplateIssue>> {
        for dialect in &self.dialects {
            let jql = dialect.jql(epic_key);
            let issues = self.tracker.search(&jql, &CHILD_FIELDS).await?;

            if issues.is_empty() {
                debug!(epic_key, %dialect, "no children found with dialect");
                continue;
            }

            info!(epic_key, %dialect, count = issues.len(), "found template children");
            return Ok(issues);
        }

        info!(epic_key, "template epic has no children");
        Ok(Vec::new())
    }
}
