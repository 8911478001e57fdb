// ABOUTME: The `say` statement executor (spec §4.E).

use crate::error::ErrorKind;
use crate::expr::eval_expr;
use crate::host::Host;
use crate::interpreter::Interpreter;
use crate::text::split_top_level;

/// `say ARG[, ARG…]`: evaluates each comma-separated argument, joins their
/// display forms with a single space, and emits one output line. An empty
/// argument list emits a blank line.
pub fn exec_say<H: Host>(interp: &mut Interpreter<H>, tail: &str) -> Result<Option<usize>, ErrorKind> {
    if tail.trim().is_empty() {
        interp.host.say("");
        return Ok(None);
    }
    let mut rendered = Vec::new();
    for part in split_top_level(tail, ',') {
        rendered.push(format!("{}", eval_expr(&part, &interp.env)?));
    }
    interp.host.say(&rendered.join(" "));
    Ok(None)
}
