// ABOUTME: Error taxonomy for Veer runtime failures, line-tagged per the Mewar error contract

use thiserror::Error;

/// The exhaustive set of runtime failure categories a Mewar program can raise.
///
/// Every variant carries whatever context its message needs; none of these
/// are user-catchable (see spec §7) — raising one always aborts the program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("{0}")]
    SyntaxError(String),

    #[error("Unknown variable or expression '{0}'")]
    NameNotFound(String),

    #[error("{0}")]
    TypeError(String),

    #[error("Index {index} out of range for list of length {length}")]
    IndexOutOfRange { index: i64, length: usize },

    #[error("{function}: expected {expected} argument{plural}, got {actual}", plural = if *expected == 1 { "" } else { "s" })]
    ArityError {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Division by zero")]
    DivideByZero,

    #[error("Cannot compare {lhs} and {rhs}")]
    ComparisonTypeError { lhs: String, rhs: String },
}

impl ErrorKind {
    pub fn syntax(message: impl Into<String>) -> Self {
        ErrorKind::SyntaxError(message.into())
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        ErrorKind::TypeError(message.into())
    }

    pub fn arity(function: impl Into<String>, expected: usize, actual: usize) -> Self {
        ErrorKind::ArityError {
            function: function.into(),
            expected,
            actual,
        }
    }
}

/// A runtime error tagged with the 1-based source line that raised it.
///
/// `Display` produces the exact wire format the driver prints:
/// `Veer Runtime Error (Line N): MESSAGE`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Veer Runtime Error (Line {line}): {kind}")]
pub struct RuntimeError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl RuntimeError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        RuntimeError { line, kind }
    }
}

/// Failures that originate outside the interpreter core: file discovery and
/// CLI usage. Kept separate from [`ErrorKind`] because they have no source
/// line to tag (spec §7: "FileNotFound (driver-only)").
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Cannot read script file {path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
