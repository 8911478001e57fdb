// ABOUTME: Line classifier: strips comments and splits a physical source
// ABOUTME: line into a command keyword and its argument tail (spec §4.D).

use crate::text::strip_comment;

/// A classified source line: its command keyword and the trimmed remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine<'a> {
    pub command: &'a str,
    pub tail: &'a str,
}

/// Classifies one physical line per spec §4.D. Returns `None` for a blank
/// or comment-only line.
pub fn classify_line(line: &str) -> Option<ClassifiedLine<'_>> {
    let stripped = strip_comment(line).trim();
    if stripped.is_empty() {
        return None;
    }
    match stripped.split_once(char::is_whitespace) {
        Some((command, rest)) => Some(ClassifiedLine {
            command,
            tail: rest.trim(),
        }),
        None => Some(ClassifiedLine {
            command: stripped,
            tail: "",
        }),
    }
}
