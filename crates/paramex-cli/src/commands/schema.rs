//! Schema command implementation.

use crate::cli::SchemaArgs;
use crate::error::{CliError, Result};
use crate::input::load_request;
use crate::output::Formatter;
use paramex_domain::{check_parameters, parameters_json_schema};
use serde_json::Value;

/// Execute the schema command.
pub fn execute_schema(args: SchemaArgs, formatter: &Formatter) -> Result<()> {
    let schema = run_schema(&args)?;
    println!("{}", formatter.format_schema(&schema)?);
    Ok(())
}

/// The JSON schema offered to models for the request's parameters.
pub fn run_schema(args: &SchemaArgs) -> Result<Value> {
    let request = load_request(&args.request)?;
    check_parameters(&request.parameters).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(parameters_json_schema(&request.parameters))
}
