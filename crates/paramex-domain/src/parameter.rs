//! Parameter module - the typed slots a caller asks the model to fill

use crate::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Type of an extractable parameter
///
/// The set is closed: validation, coercion and schema rendering all match
/// on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Free-form text
    String,

    /// Integer or floating point number
    Number,

    /// True or false
    Bool,

    /// One string out of a fixed list of options
    Select,
}

impl ParameterType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Bool => "bool",
            ParameterType::Select => "select",
        }
    }

    /// The JSON schema `type` this parameter type is rendered as
    pub fn json_type(&self) -> &'static str {
        match self {
            ParameterType::String | ParameterType::Select => "string",
            ParameterType::Number => "number",
            ParameterType::Bool => "boolean",
        }
    }

    /// Parse a parameter type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "string" => Some(ParameterType::String),
            "number" => Some(ParameterType::Number),
            "bool" | "boolean" => Some(ParameterType::Bool),
            "select" => Some(ParameterType::Select),
            _ => None,
        }
    }
}

impl std::str::FromStr for ParameterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownParameterType(s.to_string()))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter the caller wants extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Name, unique within a request
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,

    /// Human readable hint passed to the model
    #[serde(default)]
    pub description: String,

    /// Whether the model must provide a value
    #[serde(default)]
    pub required: bool,

    /// Allowed values, only meaningful for `select`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl ParameterSpec {
    /// Create a parameter with no description, not required and no options
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            description: String::new(),
            required: false,
            options: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the options of a select parameter
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// The JSON schema fragment describing this parameter
    pub fn json_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.parameter_type.json_type()));
        property.insert("description".to_string(), json!(self.description));
        if self.parameter_type == ParameterType::Select && !self.options.is_empty() {
            property.insert("enum".to_string(), json!(self.options));
        }
        Value::Object(property)
    }
}

/// Check a parameter list for empty names and duplicates
///
/// A select without options is accepted and takes any string.
pub fn check_parameters(parameters: &[ParameterSpec]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for parameter in parameters {
        if parameter.name.trim().is_empty() {
            return Err(DomainError::EmptyParameterName);
        }
        if !seen.insert(parameter.name.as_str()) {
            return Err(DomainError::DuplicateParameter(parameter.name.clone()));
        }
    }
    Ok(())
}

/// Render a parameter list as a JSON object schema
///
/// `required` keeps declaration order.
pub fn parameters_json_schema(parameters: &[ParameterSpec]) -> Value {
    let properties: Map<String, Value> = parameters
        .iter()
        .map(|p| (p.name.clone(), p.json_schema()))
        .collect();
    let required: Vec<&str> = parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameter_type() {
        assert_eq!(ParameterType::parse("string"), Some(ParameterType::String));
        assert_eq!(ParameterType::parse("Number"), Some(ParameterType::Number));
        assert_eq!(ParameterType::parse("boolean"), Some(ParameterType::Bool));
        assert_eq!(ParameterType::parse("select"), Some(ParameterType::Select));
        assert_eq!(ParameterType::parse("array"), None);

        let err = "array".parse::<ParameterType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownParameterType("array".to_string()));
    }

    #[test]
    fn test_json_type_mapping() {
        assert_eq!(ParameterType::String.json_type(), "string");
        assert_eq!(ParameterType::Select.json_type(), "string");
        assert_eq!(ParameterType::Number.json_type(), "number");
        assert_eq!(ParameterType::Bool.json_type(), "boolean");
    }

    #[test]
    fn test_schema_rendering() {
        let parameters = vec![
            ParameterSpec::new("location", ParameterType::String)
                .with_description("city name")
                .required(),
            ParameterSpec::new("unit", ParameterType::Select).with_options(["c", "f"]),
            ParameterSpec::new("days", ParameterType::Number).required(),
        ];

        let schema = parameters_json_schema(&parameters);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["location"]["type"], "string");
        assert_eq!(schema["properties"]["location"]["description"], "city name");
        assert_eq!(schema["properties"]["unit"]["enum"], json!(["c", "f"]));
        assert_eq!(schema["properties"]["days"]["type"], "number");
        assert!(schema["properties"]["days"].get("enum").is_none());
        assert_eq!(schema["required"], json!(["location", "days"]));
    }

    #[test]
    fn test_open_select_schema_has_no_enum() {
        let spec = ParameterSpec::new("unit", ParameterType::Select);
        let schema = spec.json_schema();
        assert_eq!(schema["type"], "string");
        assert!(schema.get("enum").is_none());
    }

    #[test]
    fn test_check_parameters() {
        let ok = vec![
            ParameterSpec::new("a", ParameterType::String),
            ParameterSpec::new("b", ParameterType::Select).with_options(["x"]),
        ];
        assert!(check_parameters(&ok).is_ok());

        let duplicate = vec![
            ParameterSpec::new("a", ParameterType::String),
            ParameterSpec::new("a", ParameterType::Bool),
        ];
        assert_eq!(
            check_parameters(&duplicate),
            Err(DomainError::DuplicateParameter("a".to_string()))
        );

        let no_options = vec![ParameterSpec::new("s", ParameterType::Select)];
        assert!(check_parameters(&no_options).is_ok());

        let unnamed = vec![ParameterSpec::new(" ", ParameterType::Number)];
        assert_eq!(check_parameters(&unnamed), Err(DomainError::EmptyParameterName));
    }

    #[test]
    fn test_deserialize_spec() {
        let spec: ParameterSpec =
            serde_json::from_str(r#"{"name": "flag", "type": "bool", "required": true}"#).unwrap();
        assert_eq!(spec.parameter_type, ParameterType::Bool);
        assert!(spec.required);
        assert!(spec.options.is_empty());
        assert!(spec.description.is_empty());
    }
}
