// ABOUTME: Block frames and the matching-end / matching-else scanner
// ABOUTME: that drives `if`/`while`/`for`/`repeat` nesting (spec §3.4, §4.F).

use crate::lexer::classify_line;
use crate::value::ListHandle;

/// A runtime record for an open control-flow construct (spec §3.4).
#[derive(Debug)]
pub enum BlockFrame {
    If {
        taken: bool,
    },
    While {
        header_line: usize,
    },
    For {
        header_line: usize,
        iterator_name: String,
        list: ListHandle,
        index: usize,
    },
    Repeat {
        header_line: usize,
        iterator_name: Option<String>,
        total: i64,
        iteration: i64,
    },
}

/// Commands that open a new block level, for nesting-depth bookkeeping in
/// the matching-end scanner.
fn opens_block(command: &str) -> bool {
    matches!(command, "if" | "while" | "for" | "repeat" | "function")
}

/// Walks forward from just after an opening header line and returns the
/// index of the matching `end` (spec §4.F "Matching-end scan").
///
/// `lines` is the full source; `after_header` is the line just past the
/// header whose match is sought. Comment stripping and quoted regions are
/// respected via [`classify_line`].
pub fn find_matching_end(lines: &[String], after_header: usize) -> usize {
    let mut depth = 1;
    let mut i = after_header;
    while i < lines.len() {
        if let Some(classified) = classify_line(&lines[i]) {
            if opens_block(classified.command) {
                depth += 1;
            } else if classified.command == "end" {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
        }
        i += 1;
    }
    lines.len()
}

/// Like [`find_matching_end`], but also stops at an `else` that belongs to
/// the same `if` (nesting depth exactly 1).
pub fn find_matching_end_or_else(lines: &[String], after_header: usize) -> usize {
    let mut depth = 1;
    let mut i = after_header;
    while i < lines.len() {
        if let Some(classified) = classify_line(&lines[i]) {
            if opens_block(classified.command) {
                depth += 1;
            } else if classified.command == "end" {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            } else if classified.command == "else" && depth == 1 {
                return i;
            }
        }
        i += 1;
    }
    lines.len()
}
