//! Command handlers.

pub mod clone;
pub mod resolve_field;
pub mod serve;

use std::sync::Arc;

use anyhow::Result;

use crate::adapters::JiraClient;
use crate::domain::models::JiraConfig;
use crate::services::EpicCloneService;

/// Build the clone service on top of a Jira client.
pub fn build_service(jira: &JiraConfig) -> Result<EpicCloneService> {
    let client = JiraClient::new(jira)?;
    Ok(EpicCloneService::new(Arc::new(client)))
}
