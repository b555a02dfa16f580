//! cmdline-demo
//!
//! Main entry point for the `cmdline-demo` binary.

use std::process::ExitCode;

use cmdline::Env;
use cmdline_log::LogConfig;
use tracing::debug;

mod commands;
mod error;

fn main() -> ExitCode {
    if let Err(e) = cmdline_log::init(LogConfig::from_env()) {
        eprintln!("{e}");
    }

    let program = commands::program();
    let args: Vec<String> = std::env::args().skip(1).collect();
    debug!(?args, "starting");

    match program.execute(&mut Env::stdio(), &args) {
        Ok(()) => ExitCode::SUCCESS,
        // The usage text has already been printed.
        Err(e) if e.is_usage() => e.exit_code(),
        Err(e) => {
            debug!(code = e.code(), "command failed");
            eprintln!("{}: {e}", program.root().name());
            e.exit_code()
        }
    }
}
