use anyhow::Context;
use clap::Parser;
use patron_manager::utils::{logger, validation::Validate};
use patron_manager::{CliConfig, LibraryApp};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting patron-manager");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = LibraryApp::new(stdin.lock(), stdout.lock());

    app.run(config.import.as_deref())
        .context("console session ended unexpectedly")?;

    tracing::info!("Session closed with {} patrons in memory", app.manager().len());
    Ok(())
}
