//! Common fixtures for dispatch and help output tests.
#![allow(dead_code)]

use std::io::Write;

use cmdline::{Command, Context, Env, Error, FlagSet, Program, Topic, Width};

/// Domain error returned by the echo handler.
#[derive(Debug, thiserror::Error)]
#[error("echo error")]
pub struct EchoError;

/// Captured result of one `execute` call.
#[derive(Debug)]
pub struct Outcome {
    pub result: Result<(), Error>,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    pub fn is_usage(&self) -> bool {
        matches!(self.result, Err(Error::Usage { .. }))
    }

    pub fn assert_ok(&self) {
        assert!(
            self.result.is_ok(),
            "expected success, got {:?}\nstderr:\n{}",
            self.result,
            self.stderr
        );
    }

    pub fn assert_usage(&self) {
        assert!(self.is_usage(), "expected usage error, got {:?}", self.result);
    }
}

/// Execute `program` with in-memory sinks at width 80.
pub fn run(program: &Program, args: &[&str]) -> Outcome {
    run_with_width(program, Width::Limited(80), args)
}

pub fn run_with_width(program: &Program, width: Width, args: &[&str]) -> Outcome {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let result = {
        let mut env = Env::new(&mut stdout, &mut stderr).with_width(width);
        program.execute(&mut env, &args)
    };
    Outcome {
        result,
        stdout: String::from_utf8(stdout).expect("stdout is utf-8"),
        stderr: String::from_utf8(stderr).expect("stderr is utf-8"),
    }
}

pub fn globals() -> FlagSet {
    FlagSet::new()
        .string("global1", "", "global test flag 1")
        .int("global2", 0, "global test flag 2")
}

pub const GLOBAL_FLAGS: &str = "
The global flags are:
 -global1=
   global test flag 1
 -global2=0
   global test flag 2
";

/// The help command's own block, as nested in a recursive dump.
pub fn help_block(parent: &str) -> String {
    format!(
        r#"Help with no args displays the usage of the parent command.

Help with args displays the usage of the specified sub-command or help topic.

"help ..." recursively displays help for all commands and topics.

The output is formatted to a target width in runes.  The target width is
determined by checking the environment variable CMDLINE_WIDTH, falling back on
the terminal width from the OS, falling back on 80 chars.  By setting
CMDLINE_WIDTH=x, if x > 0 the width is x, if x < 0 the width is unlimited, and
if x == 0 or is unset one of the fallbacks is used.

Usage:
   {parent} help [flags] [command/topic ...]

[command/topic ...] optionally identifies a specific sub-command or help topic.

The {parent} help flags are:
 -style=text
   The formatting style for help output, either "text" or "annotated".
"#
    )
}

pub const RULE: &str =
    "================================================================================\n";

pub fn run_echo(ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error> {
    if let [only] = args {
        match only.as_str() {
            "error" => return Err(Error::run(EchoError)),
            "bad_arg" => return Err(ctx.usage_error(format!("Invalid argument {only}"))),
            _ => {}
        }
    }
    let mut args = args.to_vec();
    if ctx.bool_flag("extra") {
        args.push("extra".to_string());
    }
    if ctx.bool_flag("tlextra") {
        args.push("tlextra".to_string());
    }
    let line = format!("[{}]", args.join(" "));
    if ctx.bool_flag("n") {
        write!(ctx.stdout(), "{line}")?;
    } else {
        writeln!(ctx.stdout(), "{line}")?;
    }
    Ok(())
}

pub fn run_hello(ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error> {
    let mut words = vec!["Hello".to_string()];
    words.extend(args.iter().cloned());
    if ctx.bool_flag("tlextra") {
        words.push("tlextra".to_string());
    }
    writeln!(ctx.stdout(), "{}", words.join(" "))?;
    Ok(())
}

pub fn echo() -> Command {
    Command::new("echo")
        .short("Print strings on stdout")
        .long("\nEcho prints any strings passed in to stdout.\n")
        .args(
            "[strings]",
            "[strings] are arbitrary strings that will be echoed.",
        )
        .run(run_echo)
}

pub fn echoopt() -> Command {
    Command::new("echoopt")
        .short("Print strings on stdout, with opts")
        .long("Echoopt prints any args passed in to stdout.\n\n\n")
        .args("[args]", "[args] are arbitrary strings that will be echoed.")
        .flags(FlagSet::new().bool("n", false, "Do not output trailing newline"))
        .run(run_echo)
}

pub fn hello(name: &str) -> Command {
    Command::new(name)
        .short("Print strings on stdout preceded by \"Hello\"")
        .long("\nHello prints any strings passed in to stdout preceded by \"Hello\".\n")
        .args(
            "[strings]",
            "[strings] are arbitrary strings that will be printed.",
        )
        .run(run_hello)
}

pub fn nocmds() -> Program {
    let root = Command::new("nocmds")
        .short("Nocmds is invalid.")
        .long("Nocmds has no commands and no run function.");
    Program::new(root, globals())
}

pub fn onecmd() -> Program {
    let root = Command::new("onecmd")
        .short("Onecmd program.")
        .long("Onecmd only has the echo command.")
        .child(echo());
    Program::new(root, globals())
}

pub fn multi() -> Program {
    let root = Command::new("multi")
        .short("Multi test command")
        .long("Multi has two variants of echo.")
        .flags(FlagSet::new().bool("extra", false, "Print an extra arg"))
        .children([echo(), echoopt()]);
    Program::new(root, globals())
}

pub fn toplevelprog() -> Program {
    let echoprog = Command::new("echoprog")
        .short("Set of echo commands")
        .long("Echoprog has two variants of echo.")
        .flags(FlagSet::new().bool("extra", false, "Print an extra arg"))
        .children([echo(), echoopt()])
        .topic(Topic::new("topic3", "Help topic 3 short", "Help topic 3 long."));
    let root = Command::new("toplevelprog")
        .short("Top level prog")
        .long("Toplevelprog has the echo subprogram and the hello command.")
        .flags(FlagSet::new().bool(
            "tlextra",
            false,
            "Print an extra arg for all commands",
        ))
        .children([echoprog, hello("hello")])
        .topic(Topic::new("topic1", "Help topic 1 short", "Help topic 1 long."))
        .topic(Topic::new("topic2", "Help topic 2 short", "Help topic 2 long."));
    Program::new(root, globals())
}

pub fn prog1() -> Program {
    let prog3 = Command::new("prog3")
        .short("Set of hello commands")
        .long("Prog3 has two variants of hello.")
        .children([hello("hello31"), hello("hello32")]);
    let prog2 = Command::new("prog2")
        .short("Set of hello commands")
        .long("Prog2 has two variants of hello and a subprogram prog3.")
        .children([hello("hello21"), prog3, hello("hello22")]);
    let root = Command::new("prog1")
        .short("Set of hello commands")
        .long("Prog1 has two variants of hello and a subprogram prog2.")
        .children([hello("hello11"), hello("hello12"), prog2]);
    Program::new(root, globals())
}

pub fn cmdargs() -> Program {
    let root = Command::new("cmdargs")
        .short("Cmdargs program.")
        .long("Cmdargs has the echo command and a Run function with args.")
        .child(echo())
        .args(
            "[strings]",
            "[strings] are arbitrary strings that will be printed.",
        )
        .run(run_hello);
    Program::new(root, globals())
}

pub fn cmdrun() -> Program {
    let root = Command::new("cmdrun")
        .short("Cmdrun program.")
        .long("Cmdrun has the echo command and a Run function with no args.")
        .child(echo())
        .run(run_hello);
    Program::new(root, globals())
}

pub fn long_commands() -> Program {
    let long = Command::new("thisisaverylongcommand")
        .short("the short description of the very long command is very long, and will have to be wrapped")
        .long("The long description of the very long command is also very long, and will similarly have to be wrapped")
        .run(run_echo);
    let short = Command::new("x")
        .short("description of short command.")
        .long("blah blah blah")
        .run(run_echo);
    let root = Command::new("program")
        .short("Test help strings when there are long commands.")
        .long("Test help strings when there are long commands.")
        .children([short, long]);
    Program::new(root, globals())
}
