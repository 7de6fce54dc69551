//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "epic-cloner")]
#[command(about = "Clone a Jira epic and its child issues into a target project", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML); missing files are ignored
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE, env = "EPIC_CLONER_CONFIG")]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve,

    /// Clone an epic once from the command line
    Clone(CloneArgs),

    /// Print the Epic Name field id resolved for a project
    ResolveField {
        /// Project key
        #[arg(short, long)]
        project: String,
    },
}

#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Key of the template epic
    #[arg(short, long)]
    pub template: String,

    /// Key of the project the clone is created in
    #[arg(short, long)]
    pub project: String,

    /// Summary of the new epic
    #[arg(short, long)]
    pub summary: String,

    /// Epic Name of the new epic (defaults to the summary)
    #[arg(short, long)]
    pub epic_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clone() {
        let cli = Cli::try_parse_from([
            "epic-cloner",
            "clone",
            "--template",
            "TPL-1",
            "--project",
            "TGT",
            "--summary",
            "Q3 launch",
        ])
        .unwrap();

        match cli.command {
            Commands::Clone(args) => {
                assert_eq!(args.template, "TPL-1");
                assert_eq!(args.project, "TGT");
                assert_eq!(args.summary, "Q3 launch");
                assert!(args.epic_name.is_none());
            }
            _ => panic!("expected clone command"),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_serve_with_config() {
        let cli = Cli::try_parse_from(["epic-cloner", "--config", "/etc/cloner.yaml", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve));
        assert_eq!(cli.config, PathBuf::from("/etc/cloner.yaml"));
    }
}
