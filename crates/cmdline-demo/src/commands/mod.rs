//! Command tree of the demo program.

use std::io::Write;

use cmdline::{Command, Context, Error, FlagSet, Program, Topic};

mod echo;
mod sum;
mod text;

pub fn program() -> Program {
    let root = Command::new("cmdline-demo")
        .short("Demo of the cmdline dispatch engine")
        .long(
            "Cmdline-demo is a small set of text utilities.

Every command below is an ordinary handler; flags are parsed per level, so a
flag belongs right after the command that declares it.",
        )
        .child(echo::command())
        .child(text::command())
        .child(sum::command())
        .topic(Topic::new(
            "width",
            "How help output is wrapped",
            "Help output is wrapped to CMDLINE_WIDTH runes when it is set to a
positive number, never wrapped when it is negative, and wrapped to the
terminal width (or 80) otherwise.",
        ))
        .topic(Topic::new(
            "exit-codes",
            "Process exit codes",
            "Cmdline-demo exits with one of:

  0  success
  1  a command failed
  2  usage error
  3  output could not be written",
        ));

    let globals = FlagSet::new().string("prefix", "", "Text written before every output line");
    Program::new(root, globals)
}

/// Write `text` line by line, each line preceded by the global prefix.
pub(crate) fn emit(ctx: &mut Context<'_, '_>, text: &str, newline: bool) -> Result<(), Error> {
    let prefix = ctx.string_flag("prefix").unwrap_or_default().to_string();
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        write!(ctx.stdout(), "{prefix}{line}")?;
        if lines.peek().is_some() || newline {
            writeln!(ctx.stdout())?;
        }
    }
    Ok(())
}
