// ABOUTME: Statement dispatch: one executor per command, matching the
// ABOUTME: table in spec §4.E. Each executor returns the program counter to
// ABOUTME: resume at, or `None` to fall through to the next line.

mod assign;
mod blocks;
mod calls;
mod io;

use crate::error::ErrorKind;
use crate::functions::CallFrame;
use crate::host::Host;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Dispatches one classified line to its statement executor.
///
/// Returns `Ok(Some(pc))` when the statement repositions the program
/// counter itself (blocks, calls, returns), `Ok(None)` to advance to the
/// next physical line, or `Err` on a runtime failure.
pub fn dispatch<H: Host>(interp: &mut Interpreter<H>, command: &str, tail: &str) -> Result<Option<usize>, ErrorKind> {
    let current_pc = interp.pc;
    match command {
        "say" => io::exec_say(interp, tail),
        "set" => assign::exec_set(interp, tail, current_pc),
        "append" => assign::exec_append(interp, tail),
        "swap" => assign::exec_swap(interp, tail),
        "if" => blocks::exec_if(interp, tail, current_pc),
        "else" => blocks::exec_else(interp, current_pc),
        "while" => blocks::exec_while(interp, tail, current_pc),
        "for" => blocks::exec_for(interp, tail, current_pc),
        "repeat" => blocks::exec_repeat(interp, tail, current_pc),
        "end" => blocks::exec_end(interp),
        "function" => calls::exec_function(interp, current_pc),
        "call" => calls::exec_call_statement(interp, tail, current_pc),
        "return" => calls::exec_return(interp, tail),
        other => Err(ErrorKind::syntax(format!("unknown command '{}'", other))),
    }
}

/// Pushes a fresh call frame and parameter scope and returns the body's
/// start line (spec §3.5, §4.E "call"). Shared by the bare `call` statement
/// and the `set X to call F …` right-hand side.
fn do_call<H: Host>(
    interp: &mut Interpreter<H>,
    name: &str,
    args_tail: &str,
    target_binding: Option<String>,
    current_pc: usize,
) -> Result<Option<usize>, ErrorKind> {
    let def = interp
        .functions
        .get(name)
        .cloned()
        .ok_or_else(|| ErrorKind::syntax(format!("unknown function '{}'", name)))?;

    let args_tail = args_tail.trim();
    let arg_exprs = if args_tail.is_empty() {
        Vec::new()
    } else {
        crate::text::split_top_level(args_tail, ',')
    };
    if arg_exprs.len() != def.parameter_names.len() {
        return Err(ErrorKind::arity(name, def.parameter_names.len(), arg_exprs.len()));
    }
    let mut values = Vec::with_capacity(arg_exprs.len());
    for expr in &arg_exprs {
        values.push(crate::expr::eval_expr(expr, &interp.env)?);
    }

    tracing::debug!(function = name, return_line = current_pc + 2, body_line = def.body_start_line + 1, "calling function");
    interp.call_stack.push(CallFrame {
        return_pc: current_pc + 1,
        target_binding,
    });
    interp.call_block_depths.push(interp.block_stack.len());
    interp.env.push_scope();
    for (param, value) in def.parameter_names.iter().zip(values) {
        interp.env.define(param.clone(), value);
    }

    Ok(Some(def.body_start_line))
}

/// Pops the innermost call frame and scope, restores the return program
/// counter, and routes the return value per spec §4.E "return".
fn pop_call_frame<H: Host>(interp: &mut Interpreter<H>, value: Value) -> Result<usize, ErrorKind> {
    let frame = interp
        .call_stack
        .pop()
        .ok_or_else(|| ErrorKind::syntax("'return' used outside of a function call"))?;
    interp.env.pop_scope();
    let depth = interp.call_block_depths.pop().unwrap_or(0);
    interp.block_stack.truncate(depth);
    tracing::debug!(return_line = frame.return_pc + 1, target = ?frame.target_binding, "returning from function");
    match frame.target_binding {
        Some(name) => interp.env.assign(&name, value),
        None => interp.pending_return = Some(value),
    }
    Ok(frame.return_pc)
}

/// Splits a `call NAME [with E1, E2, …]` tail into the function name and the
/// untrimmed argument tail.
fn parse_call_tail(tail: &str) -> (&str, &str) {
    match crate::text::find_word_outside_quotes(tail, "with") {
        Some(idx) => (tail[..idx].trim(), &tail[idx + 4..]),
        None => (tail.trim(), ""),
    }
}

/// Assigns `value` into a `set`/`return` target, which is either a simple
/// name or an indexed `name[expr]` access (spec §4.C).
fn assign_target<H: Host>(interp: &mut Interpreter<H>, target: &str, value: Value) -> Result<(), ErrorKind> {
    let (name, index_expr) = crate::expr::parse_assignment_target(target);
    match index_expr {
        Some(idx_expr) => {
            let idx_value = crate::expr::eval_expr(idx_expr, &interp.env)?;
            match idx_value {
                Value::Integer(i) => interp.env.assign_indexed(name, i, value),
                other => Err(ErrorKind::type_error(format!(
                    "list index must be an integer, got {}",
                    other.type_name()
                ))),
            }
        }
        None => {
            interp.env.assign(name, value);
            Ok(())
        }
    }
}
