//! Fixed conversation history
//!
//! Stands in for the host's memory service when replaying or testing.

use paramex_domain::ConversationMemory;

/// A conversation memory backed by a fixed list of `(speaker, text)` turns
///
/// # Examples
///
/// ```
/// use paramex_llm::StaticMemory;
/// use paramex_domain::ConversationMemory;
///
/// let memory = StaticMemory::new()
///     .with_turn("Human", "I live in Paris")
///     .with_turn("Assistant", "Noted");
/// assert_eq!(memory.history_text(2000, None), "Human: I live in Paris\nAssistant: Noted");
/// assert_eq!(memory.history_text(2000, Some(1)), "Assistant: Noted");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMemory {
    turns: Vec<(String, String)>,
}

impl StaticMemory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn with_turn(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.turns.push((speaker.into(), text.into()));
        self
    }

    /// Parse `Speaker: text` lines; lines without a colon continue the previous turn
    pub fn from_transcript(transcript: &str) -> Self {
        let mut memory = Self::new();
        for line in transcript.lines().filter(|l| !l.trim().is_empty()) {
            match line.split_once(':') {
                Some((speaker, text)) if is_speaker(speaker) => {
                    memory.turns.push((speaker.trim().to_string(), text.trim().to_string()));
                }
                _ => match memory.turns.last_mut() {
                    Some((_, text)) => {
                        text.push('\n');
                        text.push_str(line.trim());
                    }
                    None => memory.turns.push((String::new(), line.trim().to_string())),
                },
            }
        }
        memory
    }

    /// Number of turns held
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns are held
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn render(speaker: &str, text: &str) -> String {
        if speaker.is_empty() {
            text.to_string()
        } else {
            format!("{}: {}", speaker, text)
        }
    }
}

fn is_speaker(candidate: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty() && !candidate.contains(char::is_whitespace)
}

impl ConversationMemory for StaticMemory {
    fn history_text(&self, max_tokens: u32, message_limit: Option<usize>) -> String {
        let limit = message_limit.unwrap_or(self.turns.len());
        let budget = max_tokens as usize * 4;

        // Newest turns win when the budget runs out.
        let mut lines = Vec::new();
        let mut used = 0;
        for (speaker, text) in self.turns.iter().rev().take(limit) {
            let line = Self::render(speaker, text);
            used += line.chars().count() + 1;
            if used > budget {
                break;
            }
            lines.push(line);
        }
        lines.reverse();
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_memory() {
        let memory = StaticMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.history_text(100, None), "");
    }

    #[test]
    fn test_budget_drops_oldest_turns() {
        let memory = StaticMemory::new()
            .with_turn("Human", "a".repeat(40))
            .with_turn("Human", "recent");
        // 5 tokens ~ 20 chars: only the recent turn fits
        assert_eq!(memory.history_text(5, None), "Human: recent");
        assert_eq!(memory.history_text(0, None), "");
    }

    #[test]
    fn test_from_transcript() {
        let memory = StaticMemory::from_transcript("Human: hello\nAssistant: hi there\nsecond line\n");
        assert_eq!(memory.len(), 2);
        assert_eq!(
            memory.history_text(1000, None),
            "Human: hello\nAssistant: hi there\nsecond line"
        );
    }
}
