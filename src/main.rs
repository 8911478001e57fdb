//! Veer - a tree-walking interpreter for the Mewar scripting language.
//!
//! Reads a single Mewar source file, runs it to completion, and reports a
//! runtime error (if any) in the contract format described in the design
//! document.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use veer::config::{self, EXIT_OK, EXIT_RUNTIME_ERROR, EXIT_USAGE_ERROR};
use veer::error::DriverError;
use veer::host::StdioHost;
use veer::interpreter::Interpreter;

/// Veer - runs a Mewar source file.
#[derive(Parser, Debug)]
#[command(name = "veer")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for the Mewar scripting language")]
struct Cli {
    /// Path to the Mewar source file to run.
    script: PathBuf,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, env = "VEER_VERBOSE")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!(path = %cli.script.display(), "loading script file");
    let source = match std::fs::read_to_string(&cli.script) {
        Ok(source) => source,
        Err(source) => {
            let err = DriverError::FileNotFound {
                path: cli.script.display().to_string(),
                source,
            };
            eprintln!("{}", err);
            return ExitCode::from(EXIT_USAGE_ERROR as u8);
        }
    };

    let mut interpreter = Interpreter::new(&source, StdioHost);
    match interpreter.run() {
        Ok(()) => ExitCode::from(EXIT_OK as u8),
        Err(err) => {
            println!("{}", err);
            ExitCode::from(EXIT_RUNTIME_ERROR as u8)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);

    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_script_path_and_verbose_flag() {
        let cli = Cli::parse_from(["veer", "--verbose", "program.mewar"]);
        assert!(cli.verbose);
        assert_eq!(cli.script, PathBuf::from("program.mewar"));
    }

    #[test]
    fn cli_defaults_verbose_to_false() {
        let cli = Cli::parse_from(["veer", "program.mewar"]);
        assert!(!cli.verbose);
    }
}
