//! Epic Cloner - Jira epic cloning service
//!
//! Creates a new epic in a target project from a template epic, then
//! re-creates each of the template's child issues under the new epic.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the issue tracker port
//! - **Service Layer** (`services`): Field resolution, child lookup and cloning
//! - **Adapter Layer** (`adapters`): Jira REST client, HTTP API and a mock tracker
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use epic_cloner::{CloneRequest, EpicCloneService, JiraClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = epic_cloner::ConfigLoader::load("epic-cloner.yaml")?;
//!     let service = EpicCloneService::new(Arc::new(JiraClient::new(&config.jira)?));
//!     let outcome = service
//!         .clone_epic(&CloneRequest::new("TPL-1", "TGT", "Q3 launch"))
//!         .await?;
//!     println!("{}", outcome.new_epic_key);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{JiraClient, MockIssueTracker};
pub use domain::errors::{CloneError, TrackerError, TrackerResult};
pub use domain::models::{
    CloneOutcome, CloneRequest, Config, EpicDraft, JiraConfig, LoggingConfig, ServerConfig,
};
pub use domain::ports::IssueTracker;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ChildFetcher, EpicCloneService, FieldResolver};
