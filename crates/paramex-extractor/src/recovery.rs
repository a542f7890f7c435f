//! Recover a JSON value embedded anywhere in model text
//!
//! Models wrap their answer in prose, markdown fences or several candidate
//! fragments. Recovery scans for anchors (`json:` / `json=` labels, or an
//! opening brace followed by a quote or word character), bracket-matches
//! forward from each anchor and returns the first balanced candidate that
//! parses. The scan is greedy left-to-right: an earlier fragment that parses
//! wins over a later, larger one.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

fn anchor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(?i)\bjson\s*[:=]|\{\s*["\w]"#).expect("valid regex"))
}

/// Find the first balanced JSON value in `text` that parses
///
/// Returns `None` when no anchor yields valid JSON.
pub fn recover_json(text: &str) -> Option<Value> {
    for anchor in anchor_pattern().find_iter(text) {
        let Some(start) = candidate_start(text, anchor.start()) else {
            continue;
        };
        let Some(end) = find_json_end(text, start) else {
            debug!("Unbalanced brackets from offset {}", start);
            continue;
        };

        let candidate = &text[start..=end];
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => return Some(value),
            Err(e) => debug!("Candidate at offset {} is not JSON: {}", start, e),
        }
    }
    None
}

/// Where the bracketed candidate of an anchor begins
///
/// A brace anchor starts at itself; a `json:` label starts at the first
/// bracket after it.
fn candidate_start(text: &str, anchor: usize) -> Option<usize> {
    text[anchor..]
        .find(['{', '['])
        .map(|offset| anchor + offset)
}

/// Byte offset of the bracket closing the one at `start`
///
/// A closer only pops a matching opener; mismatched closers are ignored.
fn find_json_end(text: &str, start: usize) -> Option<usize> {
    let mut stack = Vec::new();
    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' | '[' => stack.push(c),
            '}' | ']' => {
                let opener = if c == '}' { '{' } else { '[' };
                if stack.last() == Some(&opener) {
                    stack.pop();
                    if stack.is_empty() {
                        return Some(start + offset);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recover_plain_object() {
        assert_eq!(recover_json(r#"{"key": "value"}"#), Some(json!({"key": "value"})));
    }

    #[test]
    fn test_recover_after_leading_prose() {
        let text = r#"Sure! {"location": "SF"}"#;
        assert_eq!(recover_json(text), Some(json!({"location": "SF"})));
    }

    #[test]
    fn test_recover_from_markdown_fences() {
        let text = "Here you go:\n```json\n{\"a\": 1, \"b\": {\"c\": [1, 2]}}\n```\nand also\n```json\n{\"a\": 2}\n```";
        assert_eq!(recover_json(text), Some(json!({"a": 1, "b": {"c": [1, 2]}})));
    }

    #[test]
    fn test_recover_json_label() {
        assert_eq!(recover_json("Result JSON: [1, 2, 3] done"), Some(json!([1, 2, 3])));
        assert_eq!(recover_json("json={\"x\": true}"), Some(json!({"x": true})));
    }

    #[test]
    fn test_unbalanced_returns_none() {
        assert_eq!(recover_json(r#"{"a": 1"#), None);
        assert_eq!(recover_json(r#"{"a": [1, 2}"#), None);
        assert_eq!(recover_json("no json here"), None);
        assert_eq!(recover_json(""), None);
    }

    #[test]
    fn test_skips_unparsable_candidate() {
        let text = r#"{"broken": ,} then {"ok": 1}"#;
        assert_eq!(recover_json(text), Some(json!({"ok": 1})));
    }

    #[test]
    fn test_first_parsable_anchor_wins() {
        // The outer fragment is not valid JSON, so the nested one is returned.
        let text = r#"{"x": 1 {"y": 2}}"#;
        assert_eq!(recover_json(text), Some(json!({"y": 2})));

        let text = r#"{"first": 1} {"second": 2}"#;
        assert_eq!(recover_json(text), Some(json!({"first": 1})));
    }

    #[test]
    fn test_multibyte_prose() {
        let text = "Voilà, résultat: {\"ville\": \"Zürich\"} ✓";
        assert_eq!(recover_json(text), Some(json!({"ville": "Zürich"})));
    }

    #[test]
    fn test_find_json_end_ignores_mismatched_closer() {
        assert_eq!(find_json_end("{]}", 0), Some(2));
        assert_eq!(find_json_end("[{]", 0), None);
    }
}
