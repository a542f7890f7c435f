//! Domain error types

use thiserror::Error;

/// Errors raised while building or checking the parameter model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parameter type string is not one of the supported types
    #[error("Unknown parameter type: {0}")]
    UnknownParameterType(String),

    /// Model mode string is not one of the supported modes
    #[error("Unknown model mode: {0}")]
    UnknownModelMode(String),

    /// Parameter name was empty
    #[error("Parameter name must not be empty")]
    EmptyParameterName,

    /// Two parameters share a name
    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),
}
