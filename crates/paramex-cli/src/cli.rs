//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paramex CLI - Extract typed parameters from text with an LLM.
#[derive(Debug, Parser)]
#[command(name = "paramex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PARAMEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `paramex_extractor=trace`); overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty JSON (default)
    Json,
    /// Table format
    Table,
    /// Compact JSON of the essential payload
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an extraction against a recorded model response
    Extract(ExtractArgs),

    /// Print the prompt an extraction would send
    Prompt(PromptArgs),

    /// Print the JSON schema of a request's parameters
    Schema(SchemaArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Extraction request (TOML)
    #[arg(short, long)]
    pub request: PathBuf,

    /// Recorded model response (JSON)
    #[arg(long)]
    pub response: PathBuf,

    /// Conversation history transcript, one `Speaker: text` turn per line
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Extraction request (TOML)
    #[arg(short, long)]
    pub request: PathBuf,

    /// Conversation history transcript
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the schema command.
#[derive(Debug, Parser)]
pub struct SchemaArgs {
    /// Extraction request (TOML)
    #[arg(short, long)]
    pub request: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "paramex",
            "extract",
            "--request",
            "req.toml",
            "--response",
            "resp.json",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.request, PathBuf::from("req.toml"));
                assert_eq!(args.response, PathBuf::from("resp.json"));
                assert!(args.history.is_none());
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_extract_requires_response() {
        let result = Cli::try_parse_from(["paramex", "extract", "-r", "req.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["paramex", "schema", "-r", "req.toml", "-f", "quiet", "--no-color"]);
        assert_eq!(cli.format, Some(CliFormat::Quiet));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Schema(_)));
    }

    #[test]
    fn test_format_conversion() {
        let format: OutputFormat = CliFormat::Table.into();
        assert_eq!(format, OutputFormat::Table);
    }
}
