//! Paramex CLI library.
//!
//! Command-line front end for the parameter extractor: runs extractions
//! against recorded model responses, prints assembled prompts and parameter
//! schemas.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
