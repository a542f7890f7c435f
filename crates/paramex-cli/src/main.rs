//! Paramex CLI - Command-line interface for the parameter extractor.

use anyhow::Context;
use clap::Parser;
use paramex_cli::commands;
use paramex_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, &formatter).context("Extraction failed")?
        }
        Command::Prompt(args) => {
            commands::execute_prompt(args, &config, &formatter).context("Prompt assembly failed")?
        }
        Command::Schema(args) => {
            commands::execute_schema(args, &formatter).context("Schema rendering failed")?
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
