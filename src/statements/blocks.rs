// ABOUTME: `if`/`else`/`while`/`for`/`repeat`/`end` statement executors —
// ABOUTME: the block engine's half of the dispatch table (spec §4.E, §4.F).

use super::pop_call_frame;
use crate::block::{find_matching_end, find_matching_end_or_else, BlockFrame};
use crate::error::ErrorKind;
use crate::expr::{eval_expr, evaluate_condition};
use crate::host::Host;
use crate::interpreter::Interpreter;
use crate::lexer::classify_line;
use crate::text::find_word_outside_quotes;
use crate::value::Value;

fn strip_then(tail: &str) -> &str {
    tail.strip_suffix("then").unwrap_or(tail).trim()
}

/// `if COND then`.
pub fn exec_if<H: Host>(interp: &mut Interpreter<H>, tail: &str, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    if evaluate_condition(strip_then(tail), &interp.env)? {
        tracing::debug!(line = current_pc + 1, "pushing if block frame (taken)");
        interp.block_stack.push(BlockFrame::If { taken: true });
        Ok(None)
    } else {
        let landing = find_matching_end_or_else(&interp.lines, current_pc + 1);
        if classify_line(&interp.lines[landing]).map(|c| c.command) == Some("else") {
            tracing::debug!(line = current_pc + 1, "pushing if block frame (not taken, has else)");
            interp.block_stack.push(BlockFrame::If { taken: false });
        }
        Ok(Some(landing + 1))
    }
}

/// `else`: only legal with an `If` innermost. If that `If` was taken, skip
/// its else-branch; a fallthrough from an untaken branch is handled by
/// `exec_if` jumping past the `else` line entirely, so reaching here always
/// means the branch was taken.
pub fn exec_else<H: Host>(interp: &mut Interpreter<H>, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    match interp.block_stack.pop() {
        Some(BlockFrame::If { taken: true }) => {
            tracing::debug!(line = current_pc + 1, "popping if block frame at else, skipping else-branch");
            let end_line = find_matching_end(&interp.lines, current_pc + 1);
            Ok(Some(end_line + 1))
        }
        Some(other) => {
            interp.block_stack.push(other);
            Err(ErrorKind::syntax("'else' without a matching 'if'"))
        }
        None => Err(ErrorKind::syntax("'else' without a matching 'if'")),
    }
}

/// `while COND then`.
pub fn exec_while<H: Host>(interp: &mut Interpreter<H>, tail: &str, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    if evaluate_condition(strip_then(tail), &interp.env)? {
        tracing::debug!(line = current_pc + 1, "pushing while block frame");
        interp.block_stack.push(BlockFrame::While { header_line: current_pc });
        Ok(None)
    } else {
        let end_line = find_matching_end(&interp.lines, current_pc + 1);
        Ok(Some(end_line + 1))
    }
}

/// `for each X in LIST`.
pub fn exec_for<H: Host>(interp: &mut Interpreter<H>, tail: &str, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    let tail = tail
        .strip_prefix("each")
        .ok_or_else(|| ErrorKind::syntax("'for' requires 'each'"))?
        .trim();
    let in_idx = find_word_outside_quotes(tail, "in").ok_or_else(|| ErrorKind::syntax("'for each' requires 'in'"))?;
    let iterator_name = tail[..in_idx].trim().to_string();
    let list_expr = tail[in_idx + 2..].trim();

    let list = match eval_expr(list_expr, &interp.env)? {
        Value::List(handle) => handle,
        other => return Err(ErrorKind::type_error(format!("'{}' is not a list, it is a {}", list_expr, other.type_name()))),
    };

    if list.borrow().is_empty() {
        let end_line = find_matching_end(&interp.lines, current_pc + 1);
        return Ok(Some(end_line + 1));
    }

    let first = list.borrow()[0].clone();
    interp.env.define(iterator_name.clone(), first);
    tracing::debug!(line = current_pc + 1, "pushing for block frame");
    interp.block_stack.push(BlockFrame::For {
        header_line: current_pc,
        iterator_name,
        list,
        index: 0,
    });
    Ok(None)
}

/// `repeat N times [as I]`.
pub fn exec_repeat<H: Host>(interp: &mut Interpreter<H>, tail: &str, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    let (count_part, iterator_name) = match find_word_outside_quotes(tail, "as") {
        Some(idx) => (tail[..idx].trim(), Some(tail[idx + 2..].trim().to_string())),
        None => (tail, None),
    };
    let count_expr = count_part.strip_suffix("times").unwrap_or(count_part).trim();
    let total = match eval_expr(count_expr, &interp.env)? {
        Value::Integer(n) => n,
        other => return Err(ErrorKind::type_error(format!("repeat count must be an integer, got {}", other.type_name()))),
    };

    if total > 0 {
        if let Some(name) = &iterator_name {
            interp.env.define(name.clone(), Value::Integer(1));
        }
        tracing::debug!(line = current_pc + 1, total, "pushing repeat block frame");
        interp.block_stack.push(BlockFrame::Repeat {
            header_line: current_pc,
            iterator_name,
            total,
            iteration: 1,
        });
        Ok(None)
    } else {
        let end_line = find_matching_end(&interp.lines, current_pc + 1);
        Ok(Some(end_line + 1))
    }
}

/// `end`: closes the innermost block frame, or performs an implicit return
/// with no value if no block is open but a call is (spec §4.F).
pub fn exec_end<H: Host>(interp: &mut Interpreter<H>) -> Result<Option<usize>, ErrorKind> {
    match interp.block_stack.pop() {
        Some(BlockFrame::If { .. }) => {
            tracing::debug!("popping if block frame at end");
            Ok(None)
        }
        Some(BlockFrame::While { header_line }) => {
            tracing::debug!(header_line = header_line + 1, "jumping back to while header for re-evaluation");
            Ok(Some(header_line))
        }
        Some(BlockFrame::For { header_line, iterator_name, list, mut index }) => {
            index += 1;
            if index < list.borrow().len() {
                let next = list.borrow()[index].clone();
                interp.env.assign(&iterator_name, next);
                tracing::debug!(header_line = header_line + 1, index, "re-pushing for block frame for next element");
                interp.block_stack.push(BlockFrame::For { header_line, iterator_name, list, index });
                Ok(Some(header_line + 1))
            } else {
                tracing::debug!(header_line = header_line + 1, "popping for block frame, list exhausted");
                Ok(None)
            }
        }
        Some(BlockFrame::Repeat { header_line, iterator_name, total, mut iteration }) => {
            iteration += 1;
            if iteration <= total {
                if let Some(name) = &iterator_name {
                    interp.env.assign(name, Value::Integer(iteration));
                }
                tracing::debug!(header_line = header_line + 1, iteration, total, "re-pushing repeat block frame for next iteration");
                interp.block_stack.push(BlockFrame::Repeat { header_line, iterator_name, total, iteration });
                Ok(Some(header_line + 1))
            } else {
                tracing::debug!(header_line = header_line + 1, "popping repeat block frame, count exhausted");
                Ok(None)
            }
        }
        None if !interp.call_stack.is_empty() => {
            tracing::debug!("no open block frame at 'end', performing implicit return");
            pop_call_frame(interp, Value::Nil).map(Some)
        }
        None => Err(ErrorKind::syntax("unexpected 'end'")),
    }
}
