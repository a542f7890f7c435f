//! Trait definitions for external interactions
//!
//! These traits define the boundaries between extraction logic and the host.
//! Implementations live in other crates or in the host application.

use crate::{LlmResponse, PromptMessage, ToolDefinition};
use serde_json::{Map, Value};

/// Trait for language model operations
///
/// Implemented by the infrastructure layer (paramex-llm) or the host.
/// Calls are blocking from the caller's point of view; timeouts, retries and
/// cancellation are the implementation's business.
pub trait LlmProvider {
    /// Error type for model operations
    type Error;

    /// Invoke the model once, without streaming
    fn invoke(
        &self,
        messages: &[PromptMessage],
        tools: &[ToolDefinition],
        model_parameters: &Map<String, Value>,
        stop: &[String],
    ) -> Result<LlmResponse, Self::Error>;

    /// Count the prompt tokens `messages` would consume on `model`
    fn num_tokens(&self, model: &str, messages: &[PromptMessage]) -> Result<u32, Self::Error>;
}

/// Trait for reading conversation history
///
/// Absent when the request has no memory configured.
pub trait ConversationMemory {
    /// Render past turns as prompt text within `max_tokens`, keeping at most
    /// `message_limit` messages when a limit is given
    fn history_text(&self, max_tokens: u32, message_limit: Option<usize>) -> String;
}
