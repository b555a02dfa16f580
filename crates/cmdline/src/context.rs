//! Output sinks and the per-invocation handler context.

use std::fmt;
use std::io::{self, Write};

use crate::command::Command;
use crate::error::Error;
use crate::flags::{FlagValue, FlagValues};
use crate::text::Width;

/// Output and error sinks plus the target width for one invocation.
pub struct Env<'io> {
    stdout: Box<dyn Write + 'io>,
    stderr: Box<dyn Write + 'io>,
    width: Width,
}

impl<'io> Env<'io> {
    /// Sinks with the default width of 80 runes.
    pub fn new<O, E>(stdout: O, stderr: E) -> Self
    where
        O: Write + 'io,
        E: Write + 'io,
    {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
            width: Width::default(),
        }
    }

    /// Override the target width.
    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.stdout
    }

    pub fn stderr(&mut self) -> &mut dyn Write {
        &mut *self.stderr
    }

    /// Write `text` to the output sink and flush it.
    pub(crate) fn print(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes())?;
        self.stdout.flush()
    }

    /// Write `text` to the error sink and flush it.
    pub(crate) fn eprint(&mut self, text: &str) -> io::Result<()> {
        self.stderr.write_all(text.as_bytes())?;
        self.stderr.flush()
    }
}

impl Env<'static> {
    /// Process stdio, with the width taken from `CMDLINE_WIDTH` or the terminal.
    pub fn stdio() -> Self {
        Env::new(io::stdout(), io::stderr()).with_width(Width::from_env())
    }
}

impl fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env").field("width", &self.width).finish_non_exhaustive()
    }
}

/// What a handler sees while it runs.
///
/// Built fresh for each handler call and dropped when it returns.
pub struct Context<'a, 'io> {
    env: &'a mut Env<'io>,
    command: &'a Command,
    path: &'a str,
    levels: &'a [FlagValues],
    globals: &'a FlagValues,
}

impl<'a, 'io> Context<'a, 'io> {
    pub(crate) fn new(
        env: &'a mut Env<'io>,
        command: &'a Command,
        path: &'a str,
        levels: &'a [FlagValues],
        globals: &'a FlagValues,
    ) -> Self {
        Self {
            env,
            command,
            path,
            levels,
            globals,
        }
    }

    pub fn stdout(&mut self) -> &mut dyn Write {
        self.env.stdout()
    }

    pub fn stderr(&mut self) -> &mut dyn Write {
        self.env.stderr()
    }

    /// The command being run.
    pub fn command(&self) -> &Command {
        self.command
    }

    /// Space-joined names from the root to the running command.
    pub fn path(&self) -> &str {
        self.path
    }

    pub fn width(&self) -> Width {
        self.env.width()
    }

    /// Look up an option value: the running command's level first, then each
    /// enclosing level, then the globals.
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.levels
            .iter()
            .rev()
            .find_map(|level| level.get(name))
            .or_else(|| self.globals.get(name))
    }

    pub fn bool_flag(&self, name: &str) -> bool {
        self.flag(name).and_then(FlagValue::as_bool).unwrap_or(false)
    }

    pub fn string_flag(&self, name: &str) -> Option<&str> {
        self.flag(name).and_then(FlagValue::as_str)
    }

    pub fn int_flag(&self, name: &str) -> Option<i64> {
        self.flag(name).and_then(FlagValue::as_int)
    }

    /// A usage error for the running command. Return it from the handler and
    /// the dispatcher prints `ERROR: <message>` followed by the command's help.
    pub fn usage_error(&self, message: impl Into<String>) -> Error {
        Error::UsageRequested {
            message: message.into(),
        }
    }
}

impl fmt::Debug for Context<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path)
            .field("levels", &self.levels)
            .field("globals", &self.globals)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{parse, FlagSet};

    fn values(set: &FlagSet, args: &[&str]) -> FlagValues {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse(&[set], &args).unwrap().values.remove(0)
    }

    #[test]
    fn test_flag_lookup_innermost_first() {
        let outer = FlagSet::new().bool("extra", false, "").string("mode", "a", "");
        let inner = FlagSet::new().string("mode", "b", "");
        let globals = FlagSet::new().int("global2", 0, "").string("mode", "g", "");
        let levels = vec![values(&outer, &["-extra"]), values(&inner, &[])];
        let globals = values(&globals, &["-global2=42"]);

        let command = Command::new("leaf");
        let mut env = Env::new(Vec::new(), Vec::new());
        let ctx = Context::new(&mut env, &command, "prog leaf", &levels, &globals);

        assert_eq!(ctx.string_flag("mode"), Some("b"));
        assert!(ctx.bool_flag("extra"));
        assert_eq!(ctx.int_flag("global2"), Some(42));
        assert!(ctx.flag("missing").is_none());
        assert!(!ctx.bool_flag("missing"));
    }

    #[test]
    fn test_usage_error_is_requested_variant() {
        let command = Command::new("leaf");
        let mut env = Env::new(Vec::new(), Vec::new());
        let globals = FlagValues::default();
        let ctx = Context::new(&mut env, &command, "leaf", &[], &globals);
        let err = ctx.usage_error("Invalid argument x");
        assert!(matches!(err, Error::UsageRequested { ref message } if message == "Invalid argument x"));
    }

    #[test]
    fn test_sinks_are_separate() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut env = Env::new(&mut out, &mut err);
            env.print("to out").unwrap();
            env.eprint("to err").unwrap();
        }
        assert_eq!(out, b"to out");
        assert_eq!(err, b"to err");
    }
}
