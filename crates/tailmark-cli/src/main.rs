//! CLI entrypoint for Tailmark.
//!
//! The binary delegates to [`tailmark_cli::run`], which loads configuration,
//! installs telemetry, loads the design system and writes decoration or hover
//! output.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    tailmark_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
