// ABOUTME: The interpreter: owns the line list, program counter, environment,
// ABOUTME: block/call stacks and function table, and drives the main fetch-
// ABOUTME: classify-execute loop (spec §2, §4.F).

use crate::block::BlockFrame;
use crate::env::Environment;
use crate::error::{ErrorKind, RuntimeError};
use crate::functions::{prescan_functions, CallFrame, FunctionTable};
use crate::host::Host;
use crate::lexer::classify_line;
use crate::statements;
use crate::value::Value;

pub struct Interpreter<H: Host> {
    pub(crate) lines: Vec<String>,
    pub(crate) pc: usize,
    pub(crate) env: Environment,
    pub(crate) block_stack: Vec<BlockFrame>,
    pub(crate) call_stack: Vec<CallFrame>,
    pub(crate) functions: FunctionTable,
    pub(crate) pending_return: Option<Value>,
    /// `block_stack` depth recorded at each call's entry, so `return`/`end`
    /// can discard any block frames left open inside a returning function.
    pub(crate) call_block_depths: Vec<usize>,
    pub(crate) host: H,
}

impl<H: Host> Interpreter<H> {
    pub fn new(source: &str, host: H) -> Self {
        let lines: Vec<String> = source.lines().map(|s| s.to_string()).collect();
        let functions = prescan_functions(&lines);
        Interpreter {
            lines,
            pc: 0,
            env: Environment::new(),
            block_stack: Vec::new(),
            call_stack: Vec::new(),
            functions,
            pending_return: None,
            call_block_depths: Vec::new(),
            host,
        }
    }

    /// Runs the program to completion (invariant 1: `pc` reaches `line_count`)
    /// or until a statement raises a runtime error, which is reported with
    /// the 1-based line number of the offending line (spec §3.6, §6).
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        tracing::info!(line_count = self.lines.len(), "starting program");
        while self.pc < self.lines.len() {
            let current = self.pc;
            let classified = classify_line(&self.lines[current]);
            let Some(classified) = classified else {
                self.pc += 1;
                continue;
            };
            let command = classified.command.to_string();
            let tail = classified.tail.to_string();
            tracing::debug!(line = current + 1, %command, "executing statement");

            match statements::dispatch(self, &command, &tail) {
                Ok(Some(next_pc)) => {
                    if next_pc != current + 1 {
                        tracing::debug!(from_line = current + 1, to_line = next_pc + 1, "program counter jump");
                    }
                    self.pc = next_pc;
                }
                Ok(None) => self.pc = current + 1,
                Err(kind) => {
                    let err = RuntimeError::new(current + 1, kind);
                    tracing::warn!(%err, "program aborted with a runtime error");
                    return Err(err);
                }
            }
        }
        tracing::info!("program finished");
        Ok(())
    }
}
