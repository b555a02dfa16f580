//! End-to-end tests for the demo binary.

mod common;

use common::{demo, stdout_of};
use predicates::prelude::*;

#[test]
fn test_echo() {
    demo()
        .args(["echo", "hello", "world"])
        .assert()
        .success()
        .stdout("hello world\n")
        .stderr("");
}

#[test]
fn test_echo_without_newline() {
    assert_eq!(stdout_of(&["echo", "-n", "a", "b"]), "a b");
}

#[test]
fn test_global_prefix() {
    assert_eq!(stdout_of(&["-prefix=> ", "echo", "a"]), "> a\n");
    assert_eq!(
        stdout_of(&["-prefix", "# ", "text", "wrap", "-width=5", "aaa", "bbb"]),
        "# aaa\n# bbb\n"
    );
}

#[test]
fn test_global_flag_after_command_is_rejected() {
    demo()
        .args(["echo", "-prefix=x", "a"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with(
            "ERROR: cmdline-demo echo: flag provided but not defined: -prefix\n",
        ));
}

#[test]
fn test_no_command() {
    demo()
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with(
            "ERROR: cmdline-demo: no command specified\n\nCmdline-demo is a small set of text utilities.\n",
        ));
}

#[test]
fn test_unknown_command() {
    demo()
        .arg("bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with(
            "ERROR: cmdline-demo: unknown command \"bogus\"\n",
        ));
}

#[test]
fn test_help() {
    demo()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The cmdline-demo commands are:\n   echo        Print strings on stdout\n   text        Text formatting commands\n   sum         Add integers\n   help        Display help for commands or topics\n",
        ))
        .stdout(predicate::str::contains(
            "The cmdline-demo additional help topics are:\n   width       How help output is wrapped\n   exit-codes  Process exit codes\n",
        ))
        .stdout(predicate::str::ends_with(
            "The global flags are:\n -prefix=\n   Text written before every output line\n",
        ));
}

#[test]
fn test_help_topic_keeps_preformatted_lines() {
    assert_eq!(
        stdout_of(&["help", "exit-codes"]),
        "Cmdline-demo exits with one of:\n\n  0  success\n  1  a command failed\n  2  usage error\n  3  output could not be written\n"
    );
}

#[test]
fn test_help_nested_command() {
    demo()
        .args(["help", "text", "wrap"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Usage:\n   cmdline-demo text wrap [flags] [words]\n\n[words] are the words to reflow.\n",
        ))
        .stdout(predicate::str::contains("The cmdline-demo text wrap flags are:\n -width=0\n"));
}

#[test]
fn test_help_flag() {
    demo()
        .args(["sum", "-help"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Sum prints the sum of its integer arguments.\n\nUsage:\n   cmdline-demo sum [integers]\n",
        ));
}

#[test]
fn test_recursive_help() {
    let out = stdout_of(&["help", "..."]);
    assert!(out.contains(&format!("{}\nCmdline-demo Text Wrap\n\n", "=".repeat(80))));
    assert!(out.contains("Cmdline-demo Exit-codes - help topic\n"));

    let annotated = stdout_of(&["help", "-style=annotated", "..."]);
    assert!(!annotated.contains(&"=".repeat(80)));
    assert!(annotated.contains("\nCmdline-demo Text Wrap\n\n"));
}

#[test]
fn test_unlimited_width_from_env() {
    let out = demo()
        .env("CMDLINE_WIDTH", "-1")
        .args(["help", "..."])
        .output()
        .expect("Failed to run binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(
        "Every command below is an ordinary handler; flags are parsed per level, so a flag belongs right after the command that declares it.\n"
    ));
}

#[test]
fn test_sum() {
    assert_eq!(stdout_of(&["sum", "1", "2", "3"]), "6\n");
    assert_eq!(stdout_of(&["sum"]), "0\n");
}

#[test]
fn test_sum_usage_error() {
    demo()
        .args(["sum", "1", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with(
            "ERROR: \"x\" is not an integer\n\nSum prints the sum of its integer arguments.\n",
        ));
}

#[test]
fn test_sum_overflow_is_command_failure() {
    demo()
        .args(["sum", "9223372036854775807", "1"])
        .assert()
        .code(1)
        .stdout("")
        .stderr("cmdline-demo: sum overflows a 64-bit integer\n");
}

#[test]
fn test_text_commands() {
    assert_eq!(
        stdout_of(&["text", "wrap", "-width=10", "aaa", "bbb", "ccc"]),
        "aaa bbb\nccc\n"
    );
    assert_eq!(stdout_of(&["text", "upper", "a", "b"]), "A B\n");

    demo()
        .args(["text", "wrap", "-width=-1", "x"])
        .assert()
        .code(1)
        .stderr("cmdline-demo: wrap width must be positive, got -1\n");

    demo()
        .args(["text"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with(
            "ERROR: cmdline-demo text: no command specified\n",
        ));
}
