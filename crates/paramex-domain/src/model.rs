//! Model module - what the core knows about the target model and its replies

use crate::message::ToolCall;
use crate::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the model consumes prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelMode {
    /// Role-tagged message list
    #[default]
    Chat,
    /// Single text blob
    Completion,
}

impl ModelMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelMode::Chat => "chat",
            ModelMode::Completion => "completion",
        }
    }
}

impl std::str::FromStr for ModelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(ModelMode::Chat),
            "completion" => Ok(ModelMode::Completion),
            _ => Err(DomainError::UnknownModelMode(s.to_string())),
        }
    }
}

/// Capabilities and invocation settings of the target model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider name, informational only
    #[serde(default)]
    pub provider: String,

    /// Model name, handed to token counting
    pub model: String,

    /// Prompt shape the model expects
    #[serde(default)]
    pub mode: ModelMode,

    /// Whether the model supports multi-turn tool calling
    #[serde(default)]
    pub supports_tool_call: bool,

    /// Context window in tokens, if known
    #[serde(default)]
    pub context_size: Option<u32>,

    /// Configured max output tokens, if any
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// Provider-specific completion parameters
    #[serde(default)]
    pub completion_params: Map<String, Value>,

    /// Stop sequences
    #[serde(default)]
    pub stop: Vec<String>,
}

impl ModelDescriptor {
    /// A chat model with no tool calling and an unknown context window
    pub fn chat(model: impl Into<String>) -> Self {
        Self {
            provider: String::new(),
            model: model.into(),
            mode: ModelMode::Chat,
            supports_tool_call: false,
            context_size: None,
            max_output_tokens: None,
            completion_params: Map::new(),
            stop: Vec::new(),
        }
    }

    /// A completion model with an unknown context window
    pub fn completion(model: impl Into<String>) -> Self {
        Self {
            mode: ModelMode::Completion,
            ..Self::chat(model)
        }
    }

    /// Enable tool calling
    pub fn with_tool_call(mut self) -> Self {
        self.supports_tool_call = true;
        self
    }

    /// Set the context window and max output tokens
    pub fn with_limits(mut self, context_size: u32, max_output_tokens: Option<u32>) -> Self {
        self.context_size = Some(context_size);
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Token and cost usage of one model call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt plus completion tokens
    #[serde(default)]
    pub total_tokens: u64,

    /// Price of the call
    #[serde(default)]
    pub total_price: f64,

    /// Currency of `total_price`
    #[serde(default)]
    pub currency: String,
}

/// What the model returned
///
/// When `tool_call` is present it is the extraction source and `text` is
/// ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Free-form text content
    #[serde(default)]
    pub text: Option<String>,

    /// First tool call, if any
    #[serde(default)]
    pub tool_call: Option<ToolCall>,

    /// Usage of the call
    #[serde(default)]
    pub usage: Usage,
}

impl LlmResponse {
    /// A text-only reply
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A tool-call reply
    pub fn tool_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            tool_call: Some(ToolCall::new("call_0", name, arguments)),
            ..Self::default()
        }
    }

    /// Attach usage
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }
}
