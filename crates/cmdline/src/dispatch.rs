//! Argument resolution and dispatch.

use tracing::{debug, warn};

use crate::command::{Command, HELP_NAME, NOT_EXECUTABLE};
use crate::context::{Context, Env};
use crate::error::Error;
use crate::flags::{self, FlagError, FlagSet, FlagValues};
use crate::help;
use crate::text::TextFormatter;
use crate::usage::Assembler;

/// A command tree bundled with the global flag schema.
///
/// The same program can be executed any number of times; parsed values live
/// only for the duration of one [`Program::execute`] call.
#[derive(Debug, Clone)]
pub struct Program {
    root: Command,
    globals: FlagSet,
}

impl Program {
    /// Bundle `root` with the flags accepted before the first command name.
    pub fn new(root: Command, globals: FlagSet) -> Self {
        Self { root, globals }
    }

    pub fn root(&self) -> &Command {
        &self.root
    }

    pub fn globals(&self) -> &FlagSet {
        &self.globals
    }

    /// Resolve `args` against the tree and run the selected command.
    ///
    /// Usage failures are printed to the error sink of `env` and returned as
    /// [`Error::Usage`]. Handler errors come back untouched.
    pub fn execute(&self, env: &mut Env<'_>, args: &[String]) -> Result<(), Error> {
        let mut dispatch = Dispatch {
            program: self,
            env,
            globals: self.globals.defaults(),
            levels: Vec::new(),
        };
        let path = self.root.name().to_string();
        dispatch.descend(&self.root, path, args)
    }
}

/// State of one `execute` call.
struct Dispatch<'p, 'e, 'io> {
    program: &'p Program,
    env: &'e mut Env<'io>,
    globals: FlagValues,
    /// Own flag values of each level walked so far, root first.
    levels: Vec<FlagValues>,
}

impl<'p> Dispatch<'p, '_, '_> {
    fn assembler(&self) -> Assembler<'p> {
        Assembler::new(TextFormatter::new(self.env.width()), &self.program.globals)
    }

    fn descend(&mut self, node: &Command, path: String, args: &[String]) -> Result<(), Error> {
        if let Some(problem) = node.config_error() {
            warn!(command = %path, "{}", problem);
            return self.fail(node, &path, format!("{path}: {problem}"));
        }

        let is_root = self.levels.is_empty();
        let mut sets = vec![node.flag_set()];
        if is_root {
            sets.push(&self.program.globals);
        }
        let parsed = match flags::parse(&sets, args) {
            Ok(parsed) => parsed,
            Err(FlagError::HelpRequested) => {
                debug!(command = %path, "help flag given");
                let text = self.assembler().full(node, &path);
                self.env.print(&text)?;
                return Ok(());
            }
            Err(e) => return self.fail(node, &path, format!("{path}: {e}")),
        };

        let mut values = parsed.values.into_iter();
        self.levels.push(values.next().unwrap_or_default());
        if let Some(globals) = values.next() {
            self.globals = globals;
        }
        let rest = parsed.rest;

        if !node.has_children() {
            return self.invoke(node, &path, rest);
        }

        match rest.split_first() {
            None if node.has_run() => self.invoke(node, &path, rest),
            None => self.fail(node, &path, format!("{path}: no command specified")),
            Some((name, tail)) => {
                if let Some(child) = node.find_child(name) {
                    debug!(command = %path, child = %name, "descending");
                    return self.descend(child, format!("{path} {name}"), tail);
                }
                if name == HELP_NAME {
                    let assembler = self.assembler();
                    return help::run(self.env, assembler, node, &path, tail);
                }
                // Only a handler that declares positional args takes the
                // unmatched name as one.
                if node.has_run() && !node.args_name().is_empty() {
                    self.invoke(node, &path, rest)
                } else {
                    self.fail(node, &path, format!("{path}: unknown command {name:?}"))
                }
            }
        }
    }

    fn invoke(&mut self, node: &Command, path: &str, args: &[String]) -> Result<(), Error> {
        let Some(runner) = node.runner() else {
            return self.fail(node, path, format!("{path}: {NOT_EXECUTABLE}"));
        };
        debug!(command = %path, args = args.len(), "running handler");
        let mut ctx = Context::new(self.env, node, path, &self.levels, &self.globals);
        match runner.run(&mut ctx, args) {
            Ok(()) => Ok(()),
            // A usage error from a handler has not been rendered yet,
            // whichever variant it was built as.
            Err(Error::UsageRequested { message } | Error::Usage { message }) => {
                self.fail(node, path, message)
            }
            Err(err) => {
                debug!(command = %path, error = %err, "handler failed");
                Err(err)
            }
        }
    }

    fn fail(&mut self, node: &Command, path: &str, message: String) -> Result<(), Error> {
        debug!(command = %path, %message, "usage error");
        let assembler = self.assembler();
        help::fail(self.env, assembler, node, path, message)
    }
}
