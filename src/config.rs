// ABOUTME: Constants shared by the CLI driver: version string and the three
// ABOUTME: process exit codes (spec §6).

/// Normal completion.
pub const EXIT_OK: i32 = 0;

/// A runtime error aborted the program (spec §7).
pub const EXIT_RUNTIME_ERROR: i32 = 1;

/// The script file could not be read, or the CLI was invoked incorrectly.
pub const EXIT_USAGE_ERROR: i32 = 2;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
