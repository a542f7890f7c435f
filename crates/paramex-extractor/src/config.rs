//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Tool name offered to function-calling models
pub const DEFAULT_TOOL_NAME: &str = "extract_parameters";

/// Tool description offered to function-calling models
pub const DEFAULT_TOOL_DESCRIPTION: &str = "Extract parameters from the natural language text";

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tokens held back for tool-call framing when budgeting history
    pub tool_call_reserve_tokens: u32,

    /// History budget used when the model's context window is unknown
    pub default_rest_tokens: u32,

    /// Name of the extraction tool
    pub tool_name: String,

    /// Description of the extraction tool
    pub tool_description: String,

    /// Insert few-shot examples into chat prompts
    pub include_examples: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tool_name.trim().is_empty() {
            return Err("tool_name must not be empty".to_string());
        }
        if self.tool_name.contains(char::is_whitespace) {
            return Err("tool_name must not contain whitespace".to_string());
        }
        if self.default_rest_tokens == 0 {
            return Err("default_rest_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tool_call_reserve_tokens: 1000,
            default_rest_tokens: 2000,
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            tool_description: DEFAULT_TOOL_DESCRIPTION.to_string(),
            include_examples: true,
        }
    }
}
