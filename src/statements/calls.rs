// ABOUTME: `function`, `call`, and `return` statement executors (spec §4.E,
// ABOUTME: §4.G).

use super::{do_call, parse_call_tail, pop_call_frame};
use crate::block::find_matching_end;
use crate::error::ErrorKind;
use crate::expr::eval_expr;
use crate::host::Host;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// `function NAME [with P1, P2, …] then`: definitions are registered by the
/// pre-scan and are side-effect-free at execution time, so the interpreter
/// simply skips the body.
pub fn exec_function<H: Host>(interp: &mut Interpreter<H>, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    let end_line = find_matching_end(&interp.lines, current_pc + 1);
    Ok(Some(end_line + 1))
}

/// `call NAME [with E1, E2, …]` in statement position: the return value,
/// if any, is discarded (published only to the pending-return slot).
pub fn exec_call_statement<H: Host>(interp: &mut Interpreter<H>, tail: &str, current_pc: usize) -> Result<Option<usize>, ErrorKind> {
    let (name, args) = parse_call_tail(tail);
    do_call(interp, name, args, None, current_pc)
}

/// `return [EXPR]`: pops the innermost call frame and its scope, restoring
/// the caller's program counter.
pub fn exec_return<H: Host>(interp: &mut Interpreter<H>, tail: &str) -> Result<Option<usize>, ErrorKind> {
    let value = if tail.trim().is_empty() {
        Value::Nil
    } else {
        eval_expr(tail, &interp.env)?
    };
    pop_call_frame(interp, value).map(Some)
}
