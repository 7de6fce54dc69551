//! Adapters for external systems.

pub mod http;
pub mod jira;
pub mod mock;

pub use jira::JiraClient;
pub use mock::MockIssueTracker;
