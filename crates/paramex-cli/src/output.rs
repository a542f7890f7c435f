//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use paramex_extractor::{ExtractionResult, ExtractionStatus, PromptBundle};
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    ///
    /// Quiet mode prints only the outputs object.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(serde_json::to_string(&result.outputs)?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
        }
    }

    fn format_result_table(&self, result: &ExtractionResult) -> String {
        if result.status == ExtractionStatus::Failed {
            return self.error(&format!("Extraction failed: {}", result.outputs.error));
        }

        let mut builder = Builder::default();
        builder.push_record(["Parameter", "Type", "Required", "Value"]);
        for parameter in &result.inputs.parameters {
            let value = result
                .outputs
                .get(&parameter.name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            builder.push_record([
                parameter.name.clone(),
                parameter.parameter_type.to_string(),
                if parameter.required { "yes" } else { "no" }.to_string(),
                value,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let status = if result.outputs.error.is_empty() {
            self.success("Extraction succeeded")
        } else {
            self.warning(&result.outputs.error)
        };
        let mut lines = vec![table.to_string(), status];
        if let Some(usage) = &result.usage {
            lines.push(self.info(&format!(
                "{} tokens, {} {}",
                usage.total_tokens, usage.total_price, usage.currency
            )));
        }
        lines.join("\n")
    }

    /// Format an assembled prompt.
    pub fn format_prompt(&self, bundle: &PromptBundle) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bundle)?),
            OutputFormat::Quiet => Ok(serde_json::to_string(&bundle.messages)?),
            OutputFormat::Table => Ok(self.format_prompt_table(bundle)),
        }
    }

    fn format_prompt_table(&self, bundle: &PromptBundle) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Role", "Content"]);
        for message in &bundle.messages {
            let mut content = message.content.clone();
            for call in &message.tool_calls {
                content.push_str(&format!("\n-> {}({})", call.name, call.arguments));
            }
            builder.push_record([message.role.as_str().to_string(), content]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let strategy = self.info(&format!(
            "Strategy: {}, mode: {}",
            bundle.strategy,
            bundle.mode.as_str()
        ));
        match &bundle.tool {
            Some(tool) => format!("{}\n{}\n{}", table, strategy, self.info(&format!("Tool: {}", tool.name))),
            None => format!("{}\n{}", table, strategy),
        }
    }

    /// Format a JSON schema.
    pub fn format_schema(&self, schema: &Value) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(serde_json::to_string(schema)?),
            OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(schema)?),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
