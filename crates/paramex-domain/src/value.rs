//! Value module - strictly typed output values

use crate::ParameterType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A value coerced to a parameter's declared type
///
/// Numbers keep the integer/float distinction of their source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Boolean
    Bool(bool),
    /// Integer number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text, also used for select values
    String(String),
}

impl ParameterValue {
    /// The fallback value for a parameter type
    pub fn default_for(parameter_type: ParameterType) -> Self {
        match parameter_type {
            ParameterType::Number => ParameterValue::Int(0),
            ParameterType::Bool => ParameterValue::Bool(false),
            ParameterType::String | ParameterType::Select => ParameterValue::String(String::new()),
        }
    }

    /// Convert back into an untyped JSON value
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::Bool(b) => Value::Bool(*b),
            ParameterValue::Int(i) => Value::from(*i),
            ParameterValue::Float(f) => Value::from(*f),
            ParameterValue::String(s) => Value::String(s.clone()),
        }
    }

    /// Whether this value already has the shape of `parameter_type`
    pub fn matches(&self, parameter_type: ParameterType) -> bool {
        matches!(
            (self, parameter_type),
            (ParameterValue::Bool(_), ParameterType::Bool)
                | (ParameterValue::Int(_) | ParameterValue::Float(_), ParameterType::Number)
                | (
                    ParameterValue::String(_),
                    ParameterType::String | ParameterType::Select
                )
        )
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Int(i) => write!(f, "{}", i),
            ParameterValue::Float(x) => write!(f, "{}", x),
            ParameterValue::String(s) => f.write_str(s),
        }
    }
}
