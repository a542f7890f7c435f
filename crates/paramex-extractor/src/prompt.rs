//! LLM prompt assembly for parameter extraction
//!
//! Two strategies:
//!
//! - **Function calling**: system + user messages, few-shot tool-call
//!   exchanges before the last user message, and one tool whose arguments
//!   schema is the parameter schema.
//! - **Prompt engineering**: the model is told to answer with raw JSON.
//!   Chat models get the schema and query embedded in the user message plus
//!   few-shot JSON answers; completion models get one text blob.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::types::ExtractionRequest;
use paramex_domain::{
    check_parameters, parameters_json_schema, ConversationMemory, LlmProvider, ModelMode,
    PromptMessage, Role, ToolCall, ToolDefinition,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;

/// How structured output is elicited from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStrategy {
    /// Offer a tool and expect a tool call
    FunctionCalling,
    /// Ask for raw JSON in the reply text
    PromptEngineering,
}

impl PromptStrategy {
    /// Function calling when the model supports tool calls, prompt engineering otherwise
    pub fn for_tool_support(supports_tool_call: bool) -> Self {
        if supports_tool_call {
            PromptStrategy::FunctionCalling
        } else {
            PromptStrategy::PromptEngineering
        }
    }
}

impl fmt::Display for PromptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStrategy::FunctionCalling => f.write_str("function_calling"),
            PromptStrategy::PromptEngineering => f.write_str("prompt_engineering"),
        }
    }
}

/// A prompt ready to send
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptBundle {
    /// Strategy that produced it
    pub strategy: PromptStrategy,

    /// Prompt shape
    pub mode: ModelMode,

    /// Messages in send order; completion prompts hold a single user message
    pub messages: Vec<PromptMessage>,

    /// Extraction tool, function calling only
    pub tool: Option<ToolDefinition>,
}

impl PromptBundle {
    /// Tools to offer the model
    pub fn tools(&self) -> &[ToolDefinition] {
        self.tool.as_slice()
    }
}

/// Builds extraction prompts for one request
pub struct PromptAssembler<'a> {
    request: &'a ExtractionRequest,
    config: &'a ExtractorConfig,
    memory: Option<&'a dyn ConversationMemory>,
}

impl<'a> PromptAssembler<'a> {
    /// Create an assembler without conversation memory
    pub fn new(request: &'a ExtractionRequest, config: &'a ExtractorConfig) -> Self {
        Self {
            request,
            config,
            memory: None,
        }
    }

    /// Include history from `memory`
    pub fn with_memory(mut self, memory: Option<&'a dyn ConversationMemory>) -> Self {
        self.memory = memory;
        self
    }

    /// Strategy chosen from the model's tool-call capability
    pub fn strategy(&self) -> PromptStrategy {
        PromptStrategy::for_tool_support(self.request.model.supports_tool_call)
    }

    /// Reject requests no prompt can be built for
    pub fn check(&self) -> Result<(), ExtractorError> {
        if self.request.query.trim().is_empty() {
            return Err(ExtractorError::Config("Query not found".to_string()));
        }
        if self.request.parameters.is_empty() {
            return Err(ExtractorError::Config("No parameters to extract".to_string()));
        }
        check_parameters(&self.request.parameters)?;

        if self.strategy() == PromptStrategy::FunctionCalling
            && self.request.model.mode == ModelMode::Completion
        {
            return Err(ExtractorError::Config(format!(
                "Model mode {} does not support function calling",
                self.request.model.mode.as_str()
            )));
        }
        Ok(())
    }

    /// Tokens left for conversation history
    ///
    /// Renders the prompt without history, counts it through the provider,
    /// adds the tool-call reserve and subtracts everything from the context
    /// window minus max output tokens. Floors at zero. Without a known
    /// context window the configured default is returned.
    pub fn rest_tokens<P>(&self, provider: &P) -> Result<u32, ExtractorError>
    where
        P: LlmProvider,
        P::Error: fmt::Display,
    {
        let model = &self.request.model;
        let Some(context_size) = model.context_size else {
            return Ok(self.config.default_rest_tokens);
        };

        let skeleton = self.template(self.strategy(), "");
        let prompt_tokens = provider
            .num_tokens(&model.model, &skeleton)
            .map_err(|e| ExtractorError::TokenCount(e.to_string()))?;
        let used = prompt_tokens.saturating_add(self.config.tool_call_reserve_tokens);
        let max_output = model.max_output_tokens.unwrap_or(0);

        let rest = context_size.saturating_sub(max_output).saturating_sub(used);
        debug!(
            "Token budget: context {}, max output {}, prompt {} (+{} reserve), rest {}",
            context_size, max_output, prompt_tokens, self.config.tool_call_reserve_tokens, rest
        );
        Ok(rest)
    }

    /// Build the prompt for the request
    pub fn assemble<P>(&self, provider: &P) -> Result<PromptBundle, ExtractorError>
    where
        P: LlmProvider,
        P::Error: fmt::Display,
    {
        self.check()?;
        let strategy = self.strategy();

        let histories = match self.memory {
            Some(memory) => {
                let rest = self.rest_tokens(provider)?;
                memory.history_text(rest, self.request.memory_window)
            }
            None => String::new(),
        };

        let mut messages = self.template(strategy, &histories);
        let mode = self.request.model.mode;
        let tool = match strategy {
            PromptStrategy::FunctionCalling => {
                if self.config.include_examples {
                    insert_before_last_user(&mut messages, self.function_calling_examples());
                }
                Some(self.tool_definition())
            }
            PromptStrategy::PromptEngineering => {
                if mode == ModelMode::Chat && self.config.include_examples {
                    insert_before_last_user(&mut messages, chat_examples());
                }
                None
            }
        };

        debug!(
            "Assembled {} prompt: {} messages, {} history chars",
            strategy,
            messages.len(),
            histories.len()
        );

        Ok(PromptBundle {
            strategy,
            mode,
            messages,
            tool,
        })
    }

    /// The extraction tool
    pub fn tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.config.tool_name.clone(),
            description: self.config.tool_description.clone(),
            parameters: parameters_json_schema(&self.request.parameters),
        }
    }

    /// Messages of the strategy's template, before any examples
    fn template(&self, strategy: PromptStrategy, histories: &str) -> Vec<PromptMessage> {
        let request = self.request;
        match (strategy, request.model.mode) {
            (PromptStrategy::FunctionCalling, _) => vec![
                PromptMessage::system(function_calling_system_prompt(
                    &self.config.tool_name,
                    histories,
                    &request.instruction,
                )),
                PromptMessage::user(request.query.clone()),
            ],
            (PromptStrategy::PromptEngineering, ModelMode::Chat) => vec![
                PromptMessage::system(json_system_prompt(histories, &request.instruction)),
                PromptMessage::user(json_user_message(
                    &parameters_json_schema(&request.parameters),
                    &request.query,
                )),
            ],
            (PromptStrategy::PromptEngineering, ModelMode::Completion) => {
                vec![PromptMessage::user(completion_prompt(
                    histories,
                    &request.instruction,
                    &parameters_json_schema(&request.parameters),
                    &request.query,
                ))]
            }
        }
    }

    /// Few-shot tool-call exchanges with fresh call ids
    fn function_calling_examples(&self) -> Vec<PromptMessage> {
        let mut messages = Vec::new();
        for (query, arguments) in FUNCTION_CALLING_EXAMPLES {
            let id = uuid::Uuid::now_v7().simple().to_string();
            messages.push(PromptMessage::user(*query));
            messages.push(PromptMessage::assistant_with_tool_calls(
                format!("I will call `{}` with the parameters found in the text.", self.config.tool_name),
                vec![ToolCall::new(id.clone(), self.config.tool_name.clone(), *arguments)],
            ));
            messages.push(PromptMessage::tool(TOOL_RESPONSE, id));
            messages.push(PromptMessage::assistant(TOOL_ACKNOWLEDGMENT));
        }
        messages
    }
}

/// Insert `examples` right before the last user message
///
/// Appends when there is no user message.
pub fn insert_before_last_user(messages: &mut Vec<PromptMessage>, examples: Vec<PromptMessage>) {
    let index = messages
        .iter()
        .rposition(|m| m.role == Role::User)
        .unwrap_or(messages.len());
    let tail = messages.split_off(index);
    messages.extend(examples);
    messages.extend(tail);
}

fn chat_examples() -> Vec<PromptMessage> {
    let mut messages = Vec::new();
    for (query, structure, answer) in chat_example_data() {
        messages.push(PromptMessage::user(json_user_message(&structure, query)));
        messages.push(PromptMessage::assistant(answer.to_string()));
    }
    messages
}

/// Synthetic tool response in few-shot exchanges
pub const TOOL_RESPONSE: &str = "Great! You have called the function with the correct parameters.";

/// Assistant acknowledgment closing each few-shot exchange
pub const TOOL_ACKNOWLEDGMENT: &str = "I have extracted the parameters, let's move on.";

const FUNCTION_CALLING_EXAMPLES: &[(&str, &str)] = &[
    (
        "What is the weather today in SF?",
        r#"{"location": "San Francisco"}"#,
    ),
    (
        "I want to eat some apple pie.",
        r#"{"food": "apple pie"}"#,
    ),
];

fn chat_example_data() -> Vec<(&'static str, Value, Value)> {
    vec![
        (
            "What is the weather today in SF?",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string", "description": "The location to get the weather for"}
                },
                "required": ["location"]
            }),
            json!({"location": "San Francisco"}),
        ),
        (
            "I want to eat some apple pie.",
            json!({
                "type": "object",
                "properties": {
                    "food": {"type": "string", "description": "The food to eat"}
                },
                "required": ["food"]
            }),
            json!({"food": "apple pie"}),
        ),
    ]
}

fn function_calling_system_prompt(tool_name: &str, histories: &str, instruction: &str) -> String {
    format!(
        r#"You extract structured information from the user's text.

### Task
Always call the `{tool_name}` function with the parameters found in the text. Only use information the text or the chat history supports.

### Memory
Chat history between the human and the assistant, inside <histories> tags:
<histories>
{histories}
</histories>

### Instructions
Follow these additional instructions as closely as possible:
<instruction>
{instruction}
</instruction>

### Output
Respond with a single `{tool_name}` call whose arguments are a JSON object. Do not include XML tags."#
    )
}

fn json_system_prompt(histories: &str, instruction: &str) -> String {
    format!(
        r#"You convert the user's text into a JSON object that follows a given structure.

### Memory
Chat history between the human and the assistant, inside <histories> tags:
<histories>
{histories}
</histories>

### Instructions
Follow these additional instructions as closely as possible:
<instruction>
{instruction}
</instruction>

### Output
Answer with the JSON object only: no explanations, no markdown, no XML tags."#
    )
}

fn json_user_message(structure: &Value, text: &str) -> String {
    format!(
        r#"### Structure
The JSON object must follow this structure:
<structure>
{structure}
</structure>

### Text
Convert the text inside <text> tags to a JSON object:
<text>
{text}
</text>"#
    )
}

fn completion_prompt(histories: &str, instruction: &str, structure: &Value, text: &str) -> String {
    format!(
        r#"Convert the text below into a JSON object that follows the given structure.

### Memory
<histories>
{histories}
</histories>

### Instructions
<instruction>
{instruction}
</instruction>

### Structure
<structure>
{structure}
</structure>

### Text
<text>
{text}
</text>

### Answer
Output only the JSON object, starting with {{ and ending with }}.
JSON:"#
    )
}
