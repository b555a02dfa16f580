//! Command and topic tree model.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::Error;
use crate::flags::FlagSet;

/// Name of the built-in help command.
pub const HELP_NAME: &str = "help";

/// Message for a node with neither children nor a handler.
pub(crate) const NOT_EXECUTABLE: &str = "neither Children nor Run is specified";

/// Message for a user child that shadows the built-in help command.
pub(crate) const HELP_CONFLICT: &str = "command \"help\" conflicts with the built-in help command";

/// A command handler.
///
/// Implemented for every `Fn(&mut Context, &[String]) -> Result<(), Error>`.
pub trait Runner: Send + Sync {
    /// Run the command with its positional arguments.
    fn run(&self, ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error>;
}

impl<F> Runner for F
where
    F: Fn(&mut Context<'_, '_>, &[String]) -> Result<(), Error> + Send + Sync,
{
    fn run(&self, ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error> {
        self(ctx, args)
    }
}

/// A help-only entry: rendered by `help`, never dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Name matched by `help <name>`.
    pub name: String,
    /// One-line description for the topics table.
    pub short: String,
    /// Text printed by `help <name>`.
    pub long: String,
}

impl Topic {
    /// A topic with its name and both descriptions.
    pub fn new(
        name: impl Into<String>,
        short: impl Into<String>,
        long: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            long: long.into(),
        }
    }
}

/// One node of the command tree.
///
/// A node needs children, a handler, or both. That is checked when the
/// node is reached during dispatch, or eagerly with [`Command::validate`].
#[derive(Clone, Default)]
pub struct Command {
    name: String,
    short: String,
    long: String,
    args_name: String,
    args_long: String,
    flags: FlagSet,
    children: Vec<Command>,
    topics: Vec<Topic>,
    runner: Option<Arc<dyn Runner>>,
    builtin_help: bool,
}

impl Command {
    /// An empty command called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// One-line description shown in command tables.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Multi-paragraph description shown at the top of the help output.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Positional argument placeholder and its description.
    pub fn args(mut self, name: impl Into<String>, long: impl Into<String>) -> Self {
        self.args_name = name.into();
        self.args_long = long.into();
        self
    }

    /// Flags parsed right after this command's name.
    pub fn flags(mut self, flags: FlagSet) -> Self {
        self.flags = flags;
        self
    }

    /// Append a subcommand.
    pub fn child(mut self, child: Command) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        self.children.extend(children);
        self
    }

    /// Append a help topic.
    pub fn topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }

    /// Set the handler.
    pub fn run<R>(mut self, runner: R) -> Self
    where
        R: Runner + 'static,
    {
        self.runner = Some(Arc::new(runner));
        self
    }

    /// The name matched against arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_desc(&self) -> &str {
        &self.short
    }

    pub fn long_desc(&self) -> &str {
        &self.long
    }

    pub fn args_name(&self) -> &str {
        &self.args_name
    }

    pub fn args_long(&self) -> &str {
        &self.args_long
    }

    pub fn flag_set(&self) -> &FlagSet {
        &self.flags
    }

    pub fn child_commands(&self) -> &[Command] {
        &self.children
    }

    pub fn topic_list(&self) -> &[Topic] {
        &self.topics
    }

    /// Whether any subcommand is declared.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether the node runs something of its own. The built-in help
    /// command counts even though it carries no [`Runner`].
    pub fn has_run(&self) -> bool {
        self.runner.is_some() || self.builtin_help
    }

    /// A node must have children, a handler, or both.
    pub fn is_executable(&self) -> bool {
        self.has_children() || self.has_run()
    }

    pub(crate) fn is_builtin_help(&self) -> bool {
        self.builtin_help
    }

    pub(crate) fn runner(&self) -> Option<&dyn Runner> {
        self.runner.as_deref()
    }

    /// Exact-name lookup among the declared children.
    pub fn find_child(&self, name: &str) -> Option<&Command> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Exact-name lookup among the topics.
    pub fn find_topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// The configuration problem at this node alone, if any.
    pub(crate) fn config_error(&self) -> Option<&'static str> {
        if !self.is_executable() {
            Some(NOT_EXECUTABLE)
        } else if self.has_children() && self.find_child(HELP_NAME).is_some() {
            Some(HELP_CONFLICT)
        } else {
            None
        }
    }

    /// Walk the whole tree and report every configuration problem.
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        self.collect_issues(&mut path, &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn collect_issues<'a>(&'a self, path: &mut Vec<&'a str>, issues: &mut Vec<ConfigIssue>) {
        path.push(&self.name);
        if let Some(message) = self.config_error() {
            issues.push(ConfigIssue {
                path: path.join(" "),
                message: message.to_string(),
            });
        }
        for (idx, child) in self.children.iter().enumerate() {
            if self.children[..idx].iter().any(|c| c.name == child.name) {
                issues.push(ConfigIssue {
                    path: path.join(" "),
                    message: format!("duplicate command name {:?}", child.name),
                });
            }
        }
        for child in &self.children {
            child.collect_issues(path, issues);
        }
        path.pop();
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("flags", &self.flags)
            .field("children", &self.children)
            .field("topics", &self.topics)
            .field("runner", &self.runner.is_some())
            .finish()
    }
}

/// A configuration problem found by [`Command::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Space-joined path of the offending node.
    pub path: String,
    /// What is wrong with the node.
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The synthesized help command. Built on demand and never stored in the
/// caller's tree.
pub(crate) fn help_command() -> Command {
    Command {
        name: HELP_NAME.to_string(),
        short: "Display help for commands or topics".to_string(),
        long: HELP_LONG.to_string(),
        args_name: "[command/topic ...]".to_string(),
        args_long: "[command/topic ...] optionally identifies a specific sub-command or help topic."
            .to_string(),
        flags: FlagSet::new().choice(
            "style",
            "text",
            &["text", "annotated"],
            "The formatting style for help output, either \"text\" or \"annotated\".",
        ),
        builtin_help: true,
        ..Command::default()
    }
}

const HELP_LONG: &str = "\
Help with no args displays the usage of the parent command.

Help with args displays the usage of the specified sub-command or help topic.

\"help ...\" recursively displays help for all commands and topics.

The output is formatted to a target width in runes.  The target width is
determined by checking the environment variable CMDLINE_WIDTH, falling back on
the terminal width from the OS, falling back on 80 chars.  By setting
CMDLINE_WIDTH=x, if x > 0 the width is x, if x < 0 the width is unlimited, and
if x == 0 or is unset one of the fallbacks is used.
";
