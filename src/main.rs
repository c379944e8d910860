use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use blockfall::app;
use blockfall::config::{Cli, Config};
use blockfall::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli).context("failed to load configuration")?;

    logging::init(config.log_file.as_deref())?;
    info!(
        gravity_ms = config.gravity_ms,
        fps = config.fps,
        seed = ?config.seed,
        "starting blockfall"
    );

    app::run(&config)
}
