//! Request, recorded response and history files.

use crate::error::{CliError, Result};
use paramex_domain::{LlmResponse, ToolCall, Usage};
use paramex_extractor::ExtractionRequest;
use paramex_llm::{LlmError, MockProvider, StaticMemory};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A model reply captured earlier, replayed instead of calling a model.
///
/// `error` makes the replay fail the call with that message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordedResponse {
    /// Reply text
    #[serde(default)]
    pub text: Option<String>,

    /// Reply tool call
    #[serde(default)]
    pub tool_call: Option<RecordedToolCall>,

    /// Usage reported for the call
    #[serde(default)]
    pub usage: Usage,

    /// Transport error to replay
    #[serde(default)]
    pub error: Option<String>,
}

/// A recorded tool call.
///
/// `arguments` may be a JSON-encoded string, as providers send it, or an
/// inline JSON value.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedToolCall {
    /// Call id
    #[serde(default)]
    pub id: Option<String>,

    /// Function name
    pub name: String,

    /// Arguments
    #[serde(default)]
    pub arguments: Value,
}

impl RecordedResponse {
    /// A provider answering every call with this recording
    pub fn into_provider(self) -> MockProvider {
        if let Some(error) = self.error {
            return MockProvider::failing(LlmError::Other(error));
        }

        let tool_call = self.tool_call.map(|call| {
            let arguments = match call.arguments {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            ToolCall::new(call.id.unwrap_or_else(|| "call_0".to_string()), call.name, arguments)
        });

        MockProvider::new(LlmResponse {
            text: self.text,
            tool_call,
            usage: self.usage,
        })
    }
}

/// Read a file to a string.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Load an extraction request from a TOML file.
pub fn load_request(path: &Path) -> Result<ExtractionRequest> {
    Ok(toml::from_str(&read_file(path)?)?)
}

/// Load a recorded response from a JSON file as a replay provider.
pub fn load_response(path: &Path) -> Result<MockProvider> {
    let recorded: RecordedResponse = serde_json::from_str(&read_file(path)?)?;
    Ok(recorded.into_provider())
}

/// Load a `Speaker: text` transcript as conversation memory.
pub fn load_history(path: &Path) -> Result<StaticMemory> {
    Ok(StaticMemory::from_transcript(&read_file(path)?))
}
