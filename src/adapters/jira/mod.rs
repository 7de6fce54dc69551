//! Jira Cloud adapter.
//!
//! Implements the [`IssueTracker`](crate::domain::ports::IssueTracker) port
//! against the Jira REST API v3: creation metadata, issue creation and JQL
//! search.

pub mod client;
pub mod models;

pub use client::JiraClient;
