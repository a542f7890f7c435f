//! Paramex Extractor
//!
//! Extracts typed parameter values from natural-language text with an LLM.
//!
//! # Overview
//!
//! A request names the query, an optional instruction, the parameters to
//! extract and the target model. The extractor builds a prompt suited to the
//! model, calls it once, recovers a JSON object from the reply, validates it
//! strictly and then coerces it leniently, so the caller always gets one
//! typed value per parameter.
//!
//! # Architecture
//!
//! ```text
//! Request → PromptAssembler → LlmProvider → recover_json → validate_result → transform_result
//! ```
//!
//! Model misbehavior degrades into a diagnostic under the `__error__` output
//! key; only a failed model call produces a `FAILED` result.
//!
//! # Example Usage
//!
//! ```
//! use paramex_domain::{ModelDescriptor, ParameterSpec, ParameterType};
//! use paramex_extractor::{ExtractionRequest, Extractor, ExtractorConfig};
//! use paramex_llm::MockProvider;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::tool_call("extract_parameters", r#"{"location": "SF"}"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let request = ExtractionRequest::new(
//!     "what's the weather in SF",
//!     vec![ParameterSpec::new("location", ParameterType::String).required()],
//!     ModelDescriptor::chat("gpt-4o").with_tool_call(),
//! );
//!
//! let result = extractor.extract(&request, None)?;
//! assert!(result.is_clean());
//! println!("{}", serde_json::to_string(&result.outputs)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod prompt;
mod recovery;
mod validator;
mod transformer;
mod extractor;


pub use error::ExtractorError;
pub use config::{ExtractorConfig, DEFAULT_TOOL_DESCRIPTION, DEFAULT_TOOL_NAME};
pub use types::{
    ExtractedObject, ExtractionInputs, ExtractionOutputs, ExtractionRequest, ExtractionResult,
    ExtractionStatus, ProcessData, Stage, DIAGNOSTIC_KEY,
};
pub use prompt::{
    insert_before_last_user, PromptAssembler, PromptBundle, PromptStrategy, TOOL_ACKNOWLEDGMENT,
    TOOL_RESPONSE,
};
pub use recovery::recover_json;
pub use validator::{validate_result, ValidationError};
pub use transformer::{coerce, default_object, transform_result};
pub use extractor::{Extractor, RECOVERY_FAILED};
