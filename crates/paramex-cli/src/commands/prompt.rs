//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::{load_history, load_request};
use crate::output::Formatter;
use paramex_domain::ConversationMemory;
use paramex_extractor::{Extractor, PromptBundle};
use paramex_llm::MockProvider;

/// Execute the prompt command.
pub fn execute_prompt(args: PromptArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let bundle = run_prompt(&args, config)?;
    println!("{}", formatter.format_prompt(&bundle)?);
    Ok(())
}

/// Assemble the prompt without calling a model.
///
/// Token counts for the history budget are estimated from character length.
pub fn run_prompt(args: &PromptArgs, config: &Config) -> Result<PromptBundle> {
    let request = load_request(&args.request)?;
    let memory = args.history.as_deref().map(load_history).transpose()?;

    let extractor = Extractor::new(MockProvider::default(), config.extractor.clone());
    let memory = memory.as_ref().map(|m| m as &dyn ConversationMemory);
    Ok(extractor.prompt(&request, memory)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{file, WEATHER_REQUEST};
    use paramex_domain::Role;
    use paramex_extractor::PromptStrategy;

    #[test]
    fn test_prompt_with_history() {
        let request = file(WEATHER_REQUEST);
        let history = file("Human: I live in Oakland\nAssistant: Nice!");
        let args = PromptArgs {
            request: request.path().to_path_buf(),
            history: Some(history.path().to_path_buf()),
        };

        let bundle = run_prompt(&args, &Config::default()).unwrap();

        assert_eq!(bundle.strategy, PromptStrategy::FunctionCalling);
        assert_eq!(bundle.messages[0].role, Role::System);
        assert!(bundle.messages[0].content.contains("Human: I live in Oakland"));
        assert!(bundle.messages[0].content.contains("Use full city names"));
        assert_eq!(bundle.tools().len(), 1);
    }

    #[test]
    fn test_prompt_without_examples() {
        let request = file(WEATHER_REQUEST);
        let args = PromptArgs {
            request: request.path().to_path_buf(),
            history: None,
        };
        let mut config = Config::default();
        config.extractor.include_examples = false;

        let bundle = run_prompt(&args, &config).unwrap();
        assert_eq!(bundle.messages.len(), 2);
    }
}
