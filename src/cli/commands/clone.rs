//! `clone`: run a single epic clone and print the outcome.

use anyhow::Result;

use crate::cli::CloneArgs;
use crate::domain::errors::CloneError;
use crate::domain::models::{CloneOutcome, CloneRequest, Config};
use crate::services::EpicCloneService;

use super::build_service;

pub async fn execute(config: &Config, args: CloneArgs, json: bool) -> Result<()> {
    let service = build_service(&config.jira)?;

    match run(&service, args).await {
        Ok(outcome) => {
            print_outcome(&outcome, json)?;
            Ok(())
        }
        Err(err) => {
            print_partial_progress(&err);
            Err(err.into())
        }
    }
}

async fn run(service: &EpicCloneService, args: CloneArgs) -> Result<CloneOutcome, CloneError> {
    let request = CloneRequest::new(args.template, args.project, args.summary);
    match args.epic_name {
        Some(epic_name) => service.clone_epic_named(&request, &epic_name).await,
        None => service.clone_epic(&request).await,
    }
}

fn print_outcome(outcome: &CloneOutcome, json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "ok": true,
            "newEpicKey": outcome.new_epic_key,
            "createdChildren": outcome.created_children,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Created epic {}", outcome.new_epic_key);
        if outcome.created_children.is_empty() {
            println!("  No child issues to clone");
        } else {
            println!("  Cloned {} child issue(s):", outcome.created_children.len());
            for key in &outcome.created_children {
                println!("    {key}");
            }
        }
    }
    Ok(())
}

/// Nothing is rolled back on failure; tell the operator what was left behind.
fn print_partial_progress(err: &CloneError) {
    if let CloneError::MissingFields(fields) = err {
        eprintln!("Blank values for: {}", fields.join(", "));
        return;
    }
    if let Some(epic_key) = err.new_epic_key() {
        eprintln!("Epic {epic_key} was created before the failure and was not removed.");
    }
    let created = err.created_children();
    if !created.is_empty() {
        eprintln!("Child issues created before the failure: {}", created.join(", "));
    }
    if let Some(tracker_error) = err.tracker_error() {
        eprintln!("Provider response: {}", tracker_error.details());
    }
}
