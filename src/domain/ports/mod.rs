//! Ports (trait interfaces) for external collaborators.

pub mod issue_tracker;

pub use issue_tracker::IssueTracker;
