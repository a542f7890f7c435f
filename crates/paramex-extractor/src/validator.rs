//! Strict validation of a recovered object against the declared parameters

use crate::types::ExtractedObject;
use paramex_domain::{ParameterSpec, ParameterType};
use serde_json::Value;
use thiserror::Error;

/// Why a recovered object does not match the parameters
///
/// Only the first violation is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Key count differs from the declared parameter count
    #[error("Invalid number of parameters: expected {expected}, got {actual}")]
    ParameterCount {
        /// Declared parameters
        expected: usize,
        /// Keys in the object
        actual: usize,
    },

    /// A required parameter is absent
    #[error("Parameter {0} is required")]
    MissingRequired(String),

    /// A select value is not one of the declared options
    #[error("Invalid value for parameter {0}: not one of the options")]
    NotAnOption(String),

    /// A value does not have the declared type
    #[error("Invalid value for parameter {name}: expected {expected}")]
    WrongType {
        /// Parameter name
        name: String,
        /// Declared type
        expected: ParameterType,
    },
}

/// Check `object` against `parameters`
///
/// Type checks apply to every declared parameter, so an absent optional
/// parameter fails its type check as well.
pub fn validate_result<'a>(
    object: &'a ExtractedObject,
    parameters: &[ParameterSpec],
) -> Result<&'a ExtractedObject, ValidationError> {
    if object.len() != parameters.len() {
        return Err(ValidationError::ParameterCount {
            expected: parameters.len(),
            actual: object.len(),
        });
    }

    for parameter in parameters {
        let value = object.get(&parameter.name);

        if parameter.required && value.is_none() {
            return Err(ValidationError::MissingRequired(parameter.name.clone()));
        }

        if parameter.parameter_type == ParameterType::Select
            && !parameter.options.is_empty()
            && !value
                .and_then(Value::as_str)
                .is_some_and(|v| parameter.options.iter().any(|o| o == v))
        {
            return Err(ValidationError::NotAnOption(parameter.name.clone()));
        }

        let well_typed = match parameter.parameter_type {
            ParameterType::Number => value.is_some_and(Value::is_number),
            ParameterType::Bool => value.is_some_and(Value::is_boolean),
            ParameterType::String | ParameterType::Select => value.is_some_and(Value::is_string),
        };
        if !well_typed {
            return Err(ValidationError::WrongType {
                name: parameter.name.clone(),
                expected: parameter.parameter_type,
            });
        }
    }

    Ok(object)
}
