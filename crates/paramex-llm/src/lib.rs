//! Paramex LLM Provider Layer
//!
//! Implementations of the `LlmProvider` and `ConversationMemory` traits from
//! `paramex-domain`.
//!
//! # Architecture
//!
//! Real model transport belongs to the host application. This crate ships the
//! deterministic pieces the extractor is tested and replayed against.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted replies, recorded calls, no network
//! - `StaticMemory`: Fixed conversation history
//!
//! # Examples
//!
//! ```
//! use paramex_llm::MockProvider;
//! use paramex_domain::LlmProvider;
//! use serde_json::Map;
//!
//! let provider = MockProvider::text("Hello from LLM!");
//! let reply = provider.invoke(&[], &[], &Map::new(), &[]).unwrap();
//! assert_eq!(reply.text.as_deref(), Some("Hello from LLM!"));
//! ```

#![warn(missing_docs)]

pub mod memory;

use paramex_domain::{LlmProvider, LlmResponse, PromptMessage, ToolDefinition};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use memory::StaticMemory;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A prompt the mock received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Messages passed to `invoke`
    pub messages: Vec<PromptMessage>,
    /// Tools passed to `invoke`
    pub tools: Vec<ToolDefinition>,
    /// Stop sequences passed to `invoke`
    pub stop: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Replies come from a queue of scripted results first, then from the
/// default reply. Clones share the queue, call log and counters.
///
/// # Examples
///
/// ```
/// use paramex_llm::{LlmError, MockProvider};
/// use paramex_domain::{LlmProvider, LlmResponse};
/// use serde_json::Map;
///
/// let provider = MockProvider::text("fallback");
/// provider.push_response(LlmResponse::tool_call("extract_parameters", r#"{"a": 1}"#));
/// provider.push_error(LlmError::RateLimitExceeded);
///
/// let first = provider.invoke(&[], &[], &Map::new(), &[]).unwrap();
/// assert!(first.tool_call.is_some());
/// assert!(provider.invoke(&[], &[], &Map::new(), &[]).is_err());
/// let third = provider.invoke(&[], &[], &Map::new(), &[]).unwrap();
/// assert_eq!(third.text.as_deref(), Some("fallback"));
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Result<LlmResponse, LlmError>,
    scripted: Arc<Mutex<VecDeque<Result<LlmResponse, LlmError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    token_count: Option<u32>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a MockProvider answering every call with `response`
    pub fn new(response: LlmResponse) -> Self {
        Self {
            default_response: Ok(response),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            token_count: None,
        }
    }

    /// Answer every call with plain text
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(LlmResponse::text(text))
    }

    /// Answer every call with a tool call
    pub fn tool_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::new(LlmResponse::tool_call(name, arguments))
    }

    /// Fail every call with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            default_response: Err(error),
            ..Self::new(LlmResponse::default())
        }
    }

    /// Report a fixed prompt token count instead of estimating one
    pub fn with_token_count(mut self, tokens: u32) -> Self {
        self.token_count = Some(tokens);
        self
    }

    /// Queue a reply for the next unscripted call
    pub fn push_response(&self, response: LlmResponse) {
        lock(&self.scripted).push_back(Ok(response));
    }

    /// Queue a failure for the next unscripted call
    pub fn push_error(&self, error: LlmError) {
        lock(&self.scripted).push_back(Err(error));
    }

    /// Get the number of times invoke was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.calls).last().cloned()
    }

    /// Rough token estimate: one token per four characters of content
    fn estimate_tokens(messages: &[PromptMessage]) -> u32 {
        let chars: usize = messages
            .iter()
            .map(|m| {
                m.content.chars().count()
                    + m.tool_calls.iter().map(|c| c.arguments.len()).sum::<usize>()
            })
            .sum();
        u32::try_from(chars.div_ceil(4)).unwrap_or(u32::MAX)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::text("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn invoke(
        &self,
        messages: &[PromptMessage],
        tools: &[ToolDefinition],
        _model_parameters: &Map<String, Value>,
        stop: &[String],
    ) -> Result<LlmResponse, Self::Error> {
        lock(&self.calls).push(RecordedCall {
            messages: messages.to_vec(),
            tools: tools.to_vec(),
            stop: stop.to_vec(),
        });

        match lock(&self.scripted).pop_front() {
            Some(scripted) => scripted,
            None => self.default_response.clone(),
        }
    }

    fn num_tokens(&self, _model: &str, messages: &[PromptMessage]) -> Result<u32, Self::Error> {
        Ok(self
            .token_count
            .unwrap_or_else(|| Self::estimate_tokens(messages)))
    }
}
