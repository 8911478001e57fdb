// ABOUTME: `set`, `append`, and `swap` statement executors (spec §4.E).

use super::{assign_target, do_call, parse_call_tail};
use crate::error::ErrorKind;
use crate::expr::eval_expr;
use crate::host::{coerce_input, Host};
use crate::interpreter::Interpreter;
use crate::text::{find_word_outside_quotes, starts_with_word};
use crate::value::Value;

/// `set TARGET to EXPR`. `EXPR` is special-cased when it begins with
/// `ask "…"` (prompt-then-read) or `call F …` (invoke a user function);
/// otherwise it is evaluated as an ordinary expression.
pub fn exec_set<H: Host>(interp: &mut Interpreter<H>, tail: &str, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    let to_idx = find_word_outside_quotes(tail, "to").ok_or_else(|| ErrorKind::syntax("'set' requires 'to'"))?;
    let target = tail[..to_idx].trim();
    let expr = tail[to_idx + 2..].trim();

    if let Some(rest) = starts_with_word(expr, "ask") {
        let prompt_value = eval_expr(rest.trim(), &interp.env)?;
        let prompt = match prompt_value {
            Value::String(s) => s,
            other => return Err(ErrorKind::type_error(format!("'ask' prompt must be a string, got {}", other.type_name()))),
        };
        let raw = interp
            .host
            .ask(&prompt)
            .map_err(|e| ErrorKind::syntax(format!("failed to read input: {}", e)))?;
        assign_target(interp, target, coerce_input(&raw))?;
        return Ok(None);
    }

    if let Some(rest) = starts_with_word(expr, "call") {
        let (name, args) = parse_call_tail(rest.trim_start());
        return do_call(interp, name, args, Some(target.to_string()), current_pc);
    }

    let value = eval_expr(expr, &interp.env)?;
    assign_target(interp, target, value)?;
    Ok(None)
}

/// `append EXPR to NAME`: `NAME` must already be bound to a List.
pub fn exec_append<H: Host>(interp: &mut Interpreter<H>, tail: &str) -> Result<Option<usize>, ErrorKind> {
    let to_idx = find_word_outside_quotes(tail, "to").ok_or_else(|| ErrorKind::syntax("'append' requires 'to'"))?;
    let expr = tail[..to_idx].trim();
    let name = tail[to_idx + 2..].trim();

    let value = eval_expr(expr, &interp.env)?;
    match interp.env.lookup(name)? {
        Value::List(handle) => {
            handle.borrow_mut().push(value);
            Ok(None)
        }
        other => Err(ErrorKind::type_error(format!(
            "'{}' is not a list, it is a {}",
            name,
            other.type_name()
        ))),
    }
}

/// `swap A and B`: both names must already be bound; their values are
/// exchanged.
pub fn exec_swap<H: Host>(interp: &mut Interpreter<H>, tail: &str) -> Result<Option<usize>, ErrorKind> {
    let and_idx = find_word_outside_quotes(tail, "and").ok_or_else(|| ErrorKind::syntax("'swap' requires 'and'"))?;
    let a = tail[..and_idx].trim();
    let b = tail[and_idx + 3..].trim();

    let va = interp.env.lookup(a)?;
    let vb = interp.env.lookup(b)?;
    interp.env.assign(a, vb);
    interp.env.assign(b, va);
    Ok(None)
}
