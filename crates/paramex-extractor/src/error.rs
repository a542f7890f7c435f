//! Error types for the Extractor

use paramex_domain::DomainError;
use thiserror::Error;

/// Errors that abort an extraction before a result can be produced
///
/// Transport failures of the model call are not errors here: they become a
/// `Failed` result.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Request or model configuration cannot be served
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token counting for the prompt budget failed
    #[error("Token count error: {0}")]
    TokenCount(String),

    /// The model's tool call carried arguments that are not valid JSON
    #[error("Invalid tool call arguments: {0}")]
    ToolCallArguments(String),
}

impl From<DomainError> for ExtractorError {
    fn from(e: DomainError) -> Self {
        ExtractorError::Config(e.to_string())
    }
}
