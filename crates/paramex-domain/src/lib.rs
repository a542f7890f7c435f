//! Paramex Domain Layer
//!
//! This crate contains the vocabulary shared by every other Paramex crate:
//! the typed parameter model a caller extracts into, the prompt message model
//! exchanged with a language model, and the trait interfaces behind which the
//! host supplies model invocation and conversation memory.
//!
//! ## Key Concepts
//!
//! - **ParameterSpec**: A named, typed slot the caller wants filled from text
//! - **ParameterType**: Closed set of slot types (string, number, bool, select)
//! - **PromptMessage**: Role-tagged message handed to the model
//! - **ToolDefinition**: Function-calling schema offered to the model
//! - **ParameterValue**: A coerced, strictly typed output value
//!
//! ## Architecture
//!
//! - Pure data and rules only, no I/O
//! - Model transport, token accounting and memory live behind traits
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod message;
pub mod model;
pub mod parameter;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use error::DomainError;
pub use message::{PromptMessage, Role, ToolCall, ToolDefinition};
pub use model::{LlmResponse, ModelDescriptor, ModelMode, Usage};
pub use parameter::{check_parameters, parameters_json_schema, ParameterSpec, ParameterType};
pub use traits::{ConversationMemory, LlmProvider};
pub use value::ParameterValue;
