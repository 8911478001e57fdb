// ABOUTME: Host capability trait: the interpreter's only window onto the
// ABOUTME: outside world, satisfying the "interactive I/O is external,
// ABOUTME: interface-only" requirement (spec §1, §6, SPEC_FULL §4.H).

use crate::value::Value;
use std::io::{self, BufRead, Write};

/// Everything the interpreter needs from its surrounding process: writing a
/// line of output and prompting for a line of input.
pub trait Host {
    fn say(&mut self, line: &str);
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// The default host: real standard input and output.
#[derive(Debug, Default)]
pub struct StdioHost;

impl Host for StdioHost {
    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        let mut buf = String::new();
        io::stdin().lock().read_line(&mut buf)?;
        Ok(buf.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Coerces a line read from `ask` per spec §6: integer if it parses whole,
/// real if it parses fractional, else left as a string.
pub fn coerce_input(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(r) = raw.parse::<f64>() {
        return Value::normalize_numeric(r);
    }
    Value::String(raw.to_string())
}

/// An in-memory host for tests: replays canned input lines and records every
/// line written via `say`.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub input: std::collections::VecDeque<String>,
    pub output: Vec<String>,
}

impl RecordingHost {
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordingHost {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }
}

impl Host for RecordingHost {
    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn ask(&mut self, _prompt: &str) -> io::Result<String> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more recorded input"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_input_recognizes_integers_reals_and_strings() {
        assert!(matches!(coerce_input("42"), Value::Integer(42)));
        assert!(matches!(coerce_input("3.5"), Value::Real(r) if (r - 3.5).abs() < 1e-9));
        assert!(matches!(coerce_input("hello"), Value::String(s) if s == "hello"));
    }

    #[test]
    fn coerce_input_normalizes_whole_valued_reals_to_integer() {
        assert!(matches!(coerce_input("4.0"), Value::Integer(4)));
    }

    #[test]
    fn recording_host_replays_input_and_captures_output() {
        let mut host = RecordingHost::with_input(["7"]);
        host.say("hi");
        assert_eq!(host.ask("Age:").unwrap(), "7");
        assert_eq!(host.output, vec!["hi".to_string()]);
    }
}
