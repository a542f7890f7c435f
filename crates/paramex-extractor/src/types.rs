//! Request and response types for extraction

use indexmap::IndexMap;
use paramex_domain::{
    ModelDescriptor, ModelMode, ParameterSpec, ParameterValue, PromptMessage, ToolCall,
    ToolDefinition, Usage,
};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Output key carrying the diagnostic text
pub const DIAGNOSTIC_KEY: &str = "__error__";

/// Untyped object recovered from the model, keyed by parameter name
pub type ExtractedObject = Map<String, Value>;

/// Request to extract parameters from text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Text to extract parameters from
    pub query: String,

    /// Free-form guidance for the model
    #[serde(default)]
    pub instruction: String,

    /// Parameters to extract, in declaration order
    pub parameters: Vec<ParameterSpec>,

    /// Target model
    pub model: ModelDescriptor,

    /// Maximum history messages taken from conversation memory
    #[serde(default)]
    pub memory_window: Option<usize>,
}

impl ExtractionRequest {
    /// Create a request with no instruction and no memory window
    pub fn new(query: impl Into<String>, parameters: Vec<ParameterSpec>, model: ModelDescriptor) -> Self {
        Self {
            query: query.into(),
            instruction: String::new(),
            parameters,
            model,
            memory_window: None,
        }
    }

    /// Set the instruction
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Set the memory window
    pub fn with_memory_window(mut self, window: usize) -> Self {
        self.memory_window = Some(window);
        self
    }
}

/// Terminal status of an extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionStatus {
    /// The model answered; outputs are fully populated
    Succeeded,
    /// The model call failed; outputs carry only the diagnostic
    Failed,
}

/// Stages an extraction moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Assembling the prompt
    Prompting,
    /// Waiting on the model
    Invoking,
    /// Pulling a JSON object out of the reply
    Recovering,
    /// Checking the object against the parameters
    Validating,
    /// Coercing values and filling defaults
    Transforming,
    /// Result assembled
    Done,
    /// Model call failed
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prompting => "prompting",
            Stage::Invoking => "invoking",
            Stage::Recovering => "recovering",
            Stage::Validating => "validating",
            Stage::Transforming => "transforming",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Typed outputs plus the diagnostic text
///
/// Serializes as one flat object: the diagnostic under [`DIAGNOSTIC_KEY`]
/// followed by the values in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionOutputs {
    /// Coerced values in declaration order
    pub values: IndexMap<String, ParameterValue>,

    /// Empty on clean success
    pub error: String,
}

impl ExtractionOutputs {
    /// Outputs of a failed call: no values, only the diagnostic
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            values: IndexMap::new(),
            error: error.into(),
        }
    }

    /// Look up a value by parameter name
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(DIAGNOSTIC_KEY.to_string(), Value::String(self.error.clone()));
        for (name, value) in &self.values {
            object.insert(name.clone(), value.to_json());
        }
        Value::Object(object)
    }
}

impl Serialize for ExtractionOutputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(DIAGNOSTIC_KEY, &self.error)?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Echo of what was asked
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionInputs {
    /// The query text
    pub query: String,
    /// The instruction text
    pub instruction: String,
    /// The declared parameters
    pub parameters: Vec<ParameterSpec>,
}

/// Trace of the model exchange, kept for the host to display
#[derive(Debug, Clone, Serialize)]
pub struct ProcessData {
    /// Prompt shape used
    pub model_mode: ModelMode,
    /// Messages sent
    pub prompts: Vec<PromptMessage>,
    /// Tool offered, if the function-calling strategy was used
    pub function: Option<ToolDefinition>,
    /// Tool call returned, if any
    pub tool_call: Option<ToolCall>,
    /// Usage of the call
    pub usage: Usage,
}

/// Result of an extraction
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Terminal status
    pub status: ExtractionStatus,

    /// Echo of the request
    pub inputs: ExtractionInputs,

    /// Model exchange trace, absent on failure
    pub process_data: Option<ProcessData>,

    /// Values and diagnostic
    pub outputs: ExtractionOutputs,

    /// Token and cost usage, absent on failure
    pub usage: Option<Usage>,
}

impl ExtractionResult {
    /// Whether the outputs are a clean, undegraded success
    pub fn is_clean(&self) -> bool {
        self.status == ExtractionStatus::Succeeded && self.outputs.error.is_empty()
    }
}
