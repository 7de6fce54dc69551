//! Command-line interface.

pub mod commands;
pub mod types;

pub use types::{Cli, CloneArgs, Commands};

/// Print a command failure and exit with status 1.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        let output = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{output}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
