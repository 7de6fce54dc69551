//! Epic Cloner entry point.

use clap::Parser;

use epic_cloner::cli::{commands, Cli, Commands};
use epic_cloner::infrastructure::config::ConfigLoader;
use epic_cloner::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(&cli.config) {
        Ok(config) => config,
        Err(err) => epic_cloner::cli::handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => epic_cloner::cli::handle_error(&err, cli.json),
    };

    let result = match cli.command {
        Commands::Serve => commands::serve::execute(config).await,
        Commands::Clone(args) => commands::clone::execute(&config, args, cli.json).await,
        Commands::ResolveField { project } => {
            commands::resolve_field::execute(&config, &project, cli.json).await
        }
    };

    if let Err(err) = result {
        epic_cloner::cli::handle_error(&err, cli.json);
    }
}
