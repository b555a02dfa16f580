//! Common test utilities for running the demo binary.
#![allow(dead_code)]

use assert_cmd::Command;

/// The demo binary with a fixed output width and quiet logging.
pub fn demo() -> Command {
    let mut cmd = Command::cargo_bin("cmdline-demo").expect("Binary not found");
    cmd.env("CMDLINE_WIDTH", "80")
        .env("CMDLINE_LOG_LEVEL", "error")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the demo with `args` and return its stdout.
pub fn stdout_of(args: &[&str]) -> String {
    let output = demo().args(args).output().expect("Failed to run binary");
    assert!(
        output.status.success(),
        "Command failed with status: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}
