//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::prompt::{PromptAssembler, PromptBundle};
use crate::recovery::recover_json;
use crate::transformer::{default_object, transform_result};
use crate::types::{
    ExtractedObject, ExtractionInputs, ExtractionOutputs, ExtractionRequest, ExtractionResult,
    ExtractionStatus, ProcessData, Stage,
};
use crate::validator::validate_result;
use paramex_domain::{ConversationMemory, LlmProvider, LlmResponse};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Diagnostic recorded when no object could be recovered from the reply
pub const RECOVERY_FAILED: &str =
    "Failed to extract result from function call or text response, using empty result.";

/// The Extractor turns a natural-language query into typed parameter values
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self::from_shared(Arc::new(llm_provider), config)
    }

    /// Create an Extractor over a provider shared with other callers
    pub fn from_shared(llm_provider: Arc<L>, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The model provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Assemble the prompt `extract` would send, without calling the model
    pub fn prompt(
        &self,
        request: &ExtractionRequest,
        memory: Option<&dyn ConversationMemory>,
    ) -> Result<PromptBundle, ExtractorError> {
        self.config.validate().map_err(ExtractorError::Config)?;
        PromptAssembler::new(request, &self.config)
            .with_memory(memory)
            .assemble(self.llm_provider.as_ref())
    }

    /// Extract parameters from the request's query
    ///
    /// Prompting problems are returned as `Err`. A failed model call yields a
    /// `Failed` result carrying only the error text. Anything the model gets
    /// wrong after that is recorded as a diagnostic while the outputs are
    /// still filled with one typed value per parameter.
    pub fn extract(
        &self,
        request: &ExtractionRequest,
        memory: Option<&dyn ConversationMemory>,
    ) -> Result<ExtractionResult, ExtractorError> {
        info!(
            "Starting extraction for model '{}': {} parameters, query length {}",
            request.model.model,
            request.parameters.len(),
            request.query.len()
        );
        let inputs = ExtractionInputs {
            query: request.query.clone(),
            instruction: request.instruction.clone(),
            parameters: request.parameters.clone(),
        };

        enter(Stage::Prompting);
        let bundle = self.prompt(request, memory)?;

        enter(Stage::Invoking);
        let response = match self.llm_provider.invoke(
            &bundle.messages,
            bundle.tools(),
            &request.model.completion_params,
            &request.model.stop,
        ) {
            Ok(response) => response,
            Err(e) => {
                let error = e.to_string();
                warn!("Model call failed: {}", error);
                enter(Stage::Failed);
                return Ok(ExtractionResult {
                    status: ExtractionStatus::Failed,
                    inputs,
                    process_data: None,
                    outputs: ExtractionOutputs::failed(error),
                    usage: None,
                });
            }
        };

        enter(Stage::Recovering);
        let (object, mut error) = match recover_object(&response)? {
            Some(object) => (object, String::new()),
            None => {
                warn!("Nothing recovered from the model reply, using defaults");
                (default_object(&request.parameters), RECOVERY_FAILED.to_string())
            }
        };

        enter(Stage::Validating);
        if let Err(e) = validate_result(&object, &request.parameters) {
            warn!("Validation failed: {}", e);
            error = e.to_string();
        }

        enter(Stage::Transforming);
        let values = transform_result(&object, &request.parameters);

        enter(Stage::Done);
        info!(
            "Extraction complete: {} values, {} tokens, diagnostic: {}",
            values.len(),
            response.usage.total_tokens,
            if error.is_empty() { "none" } else { error.as_str() }
        );

        let LlmResponse {
            tool_call, usage, ..
        } = response;
        Ok(ExtractionResult {
            status: ExtractionStatus::Succeeded,
            inputs,
            process_data: Some(ProcessData {
                model_mode: bundle.mode,
                prompts: bundle.messages,
                function: bundle.tool,
                tool_call,
                usage: usage.clone(),
            }),
            outputs: ExtractionOutputs { values, error },
            usage: Some(usage),
        })
    }
}

fn enter(stage: Stage) {
    debug!("Entering stage {}", stage);
}

/// Pull the extracted object out of a model reply
///
/// The first tool call wins over the text. Tool-call arguments that are
/// present but not JSON are an error; everything else that yields no object
/// is `None`.
fn recover_object(response: &LlmResponse) -> Result<Option<ExtractedObject>, ExtractorError> {
    let value = match &response.tool_call {
        Some(call) if call.arguments.trim().is_empty() => {
            debug!("Tool call '{}' has no arguments", call.name);
            None
        }
        Some(call) => Some(
            serde_json::from_str::<Value>(&call.arguments)
                .map_err(|e| ExtractorError::ToolCallArguments(e.to_string()))?,
        ),
        None => response.text.as_deref().and_then(recover_json),
    };

    match value {
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(other) => {
            debug!("Recovered JSON is not an object: {}", other);
            Ok(None)
        }
        None => Ok(None),
    }
}
