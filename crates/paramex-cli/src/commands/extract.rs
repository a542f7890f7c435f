//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::{load_history, load_request, load_response};
use crate::output::Formatter;
use paramex_domain::ConversationMemory;
use paramex_extractor::{ExtractionResult, Extractor};
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let result = run_extract(&args, config)?;
    println!("{}", formatter.format_result(&result)?);
    Ok(())
}

/// Replay the recorded response through the full pipeline.
pub fn run_extract(args: &ExtractArgs, config: &Config) -> Result<ExtractionResult> {
    let request = load_request(&args.request)?;
    let provider = load_response(&args.response)?;
    let memory = args.history.as_deref().map(load_history).transpose()?;
    info!(
        "Replaying {} against {} parameters",
        args.response.display(),
        request.parameters.len()
    );

    let extractor = Extractor::new(provider, config.extractor.clone());
    let memory = memory.as_ref().map(|m| m as &dyn ConversationMemory);
    Ok(extractor.extract(&request, memory)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{file, WEATHER_REQUEST};
    use crate::error::CliError;
    use paramex_domain::ParameterValue;
    use paramex_extractor::{ExtractionStatus, ExtractorError, RECOVERY_FAILED};

    fn run(response: &str, history: Option<&str>) -> Result<ExtractionResult> {
        let request = file(WEATHER_REQUEST);
        let response = file(response);
        let history = history.map(file);
        let args = ExtractArgs {
            request: request.path().to_path_buf(),
            response: response.path().to_path_buf(),
            history: history.as_ref().map(|h| h.path().to_path_buf()),
        };
        run_extract(&args, &Config::default())
    }

    #[test]
    fn test_tool_call_replay() {
        let result = run(
            r#"{"tool_call": {"name": "extract_parameters", "arguments": "{\"location\": \"San Francisco\", \"days\": 3}"}, "usage": {"total_tokens": 88}}"#,
            Some("Human: planning a trip\nAssistant: where to?"),
        )
        .unwrap();

        assert!(result.is_clean());
        assert_eq!(
            result.outputs.get("location"),
            Some(&ParameterValue::String("San Francisco".into()))
        );
        assert_eq!(result.outputs.get("days"), Some(&ParameterValue::Int(3)));
        assert_eq!(result.usage.unwrap().total_tokens, 88);
    }

    #[test]
    fn test_text_replay_without_json() {
        let result = run(r#"{"text": "No idea, sorry."}"#, None).unwrap();
        assert_eq!(result.status, ExtractionStatus::Succeeded);
        assert_eq!(result.outputs.error, RECOVERY_FAILED);
        assert_eq!(result.outputs.get("days"), Some(&ParameterValue::Int(0)));
    }

    #[test]
    fn test_error_replay() {
        let result = run(r#"{"error": "quota exhausted"}"#, None).unwrap();
        assert_eq!(result.status, ExtractionStatus::Failed);
        assert_eq!(result.outputs.error, "LLM error: quota exhausted");
    }

    #[test]
    fn test_malformed_arguments_replay() {
        let result = run(
            r#"{"tool_call": {"name": "extract_parameters", "arguments": "{oops"}}"#,
            None,
        );
        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::ToolCallArguments(_)))
        ));
    }
}
