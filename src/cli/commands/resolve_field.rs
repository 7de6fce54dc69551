//! `resolve-field`: show which Epic Name field a project resolves to.

use anyhow::{Context, Result};

use crate::domain::models::Config;
use crate::services::FALLBACK_EPIC_NAME_FIELD;

use super::build_service;

pub async fn execute(config: &Config, project: &str, json: bool) -> Result<()> {
    let service = build_service(&config.jira)?;
    let field_id = service
        .field_resolver()
        .epic_name_field(project)
        .await
        .context("Failed to fetch Epic creation metadata")?;
    let fallback = field_id == FALLBACK_EPIC_NAME_FIELD;

    if json {
        let output = serde_json::json!({
            "project_key": project,
            "epic_name_field": field_id,
            "fallback": fallback,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if fallback {
        println!("{project}: {field_id} (fallback, no \"Epic Name\" field in metadata)");
    } else {
        println!("{project}: {field_id}");
    }

    Ok(())
}
