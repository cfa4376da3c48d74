use super::args::{Cli, Commands};
use super::handlers;
use crate::config::{Config, resolve_config_path};
use crate::logging;
use anyhow::Result;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;
    debug!(path = %config_path.display(), "configuration loaded");

    match cli.command {
        Commands::Render {
            kind,
            input,
            output,
        } => handlers::render::handle(kind, &input, &output, &config),
        Commands::Config => handlers::config::handle(&config),
    }
}
