//! Command implementations.

pub mod extract;
pub mod prompt;
pub mod schema;

pub use self::extract::execute_extract;
pub use self::prompt::execute_prompt;
pub use self::schema::execute_schema;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub const WEATHER_REQUEST: &str = r#"
query = "what's the weather in SF"
instruction = "Use full city names"

[[parameters]]
name = "location"
type = "string"
description = "City to look up"
required = true

[[parameters]]
name = "days"
type = "number"

[model]
provider = "openai"
model = "gpt-4o"
mode = "chat"
supports_tool_call = true
"#;

    pub fn file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }
}
