//! The built-in help command.
//!
//! `help` is synthesized at every node with children. With no names it
//! prints the parent's help; with names it walks children and topics; a final
//! `...` dumps the whole subtree.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::command::{help_command, Command, Topic, HELP_NAME};
use crate::context::Env;
use crate::error::Error;
use crate::flags::{self, FlagError};
use crate::usage::{Assembler, Depth};

/// Argument that requests a recursive dump.
pub const RECURSIVE: &str = "...";

/// Decoration of the blocks in a recursive dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// A full-width rule of `=` above each block title.
    #[default]
    Text,
    /// A blank line above each block title.
    Annotated,
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "annotated" => Ok(Self::Annotated),
            other => Err(format!("unknown help style {other:?}")),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Annotated => f.write_str("annotated"),
        }
    }
}

/// Renders help output for a subtree.
pub(crate) struct HelpWriter<'a> {
    assembler: Assembler<'a>,
    style: Style,
}

impl<'a> HelpWriter<'a> {
    pub(crate) fn new(assembler: Assembler<'a>, style: Style) -> Self {
        Self { assembler, style }
    }

    /// Recursive dump rooted at `node`.
    pub(crate) fn dump(&self, node: &Command, path: &str) -> String {
        let mut out = self.assembler.full(node, path);
        for child in node.child_commands() {
            self.dump_nested(child, &format!("{path} {}", child.name()), &mut out);
        }
        if node.has_children() {
            let help_path = format!("{path} {HELP_NAME}");
            out.push_str(&self.header(&help_path));
            out.push_str(&self.assembler.render(&help_command(), &help_path, Depth::Nested));
        }
        for topic in node.topic_list() {
            self.topic_block(topic, path, &mut out);
        }
        out
    }

    fn dump_nested(&self, node: &Command, path: &str, out: &mut String) {
        out.push_str(&self.header(path));
        out.push_str(&self.assembler.render(node, path, Depth::Nested));
        for child in node.child_commands() {
            self.dump_nested(child, &format!("{path} {}", child.name()), out);
        }
        for topic in node.topic_list() {
            self.topic_block(topic, path, out);
        }
    }

    fn topic_block(&self, topic: &Topic, parent_path: &str, out: &mut String) {
        let path = format!("{parent_path} {}", topic.name);
        out.push_str(&self.separator());
        out.push_str(&title(&path));
        out.push_str(" - help topic\n\n");
        out.push_str(&self.assembler.formatter().fill(&topic.long, 0));
    }

    fn header(&self, path: &str) -> String {
        format!("{}{}\n\n", self.separator(), title(path))
    }

    fn separator(&self) -> String {
        match self.style {
            Style::Text => self.assembler.formatter().rule('='),
            Style::Annotated => "\n".to_string(),
        }
    }
}

/// Block title: every path element capitalized, joined by spaces.
pub(crate) fn title(path: &str) -> String {
    path.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Run `help` for `parent`, where `args` are the tokens after `help`.
pub(crate) fn run(
    env: &mut Env<'_>,
    assembler: Assembler<'_>,
    parent: &Command,
    parent_path: &str,
    args: &[String],
) -> Result<(), Error> {
    let help = help_command();
    let help_path = format!("{parent_path} {HELP_NAME}");

    let parsed = match flags::parse(&[help.flag_set()], args) {
        Ok(parsed) => parsed,
        Err(FlagError::HelpRequested) => {
            env.print(&assembler.full(&help, &help_path))?;
            return Ok(());
        }
        Err(e) => {
            return fail(env, assembler, &help, &help_path, format!("{help_path}: {e}"));
        }
    };
    // The style flag only accepts its declared choices.
    let style = parsed
        .values
        .first()
        .and_then(|values| values.get_str("style"))
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    let writer = HelpWriter::new(assembler, style);
    let names = parsed.rest;
    debug!(command = %parent_path, names = ?names, style = %style, "help requested");

    let mut node: Cow<'_, Command> = Cow::Borrowed(parent);
    let mut path = parent_path.to_string();
    for (idx, name) in names.iter().enumerate() {
        let last = idx + 1 == names.len();
        if name == RECURSIVE && last {
            env.print(&writer.dump(&node, &path))?;
            return Ok(());
        }
        if let Some(child) = lookup_child(&node, name) {
            node = child;
            path = format!("{path} {name}");
            continue;
        }
        if let Some(topic) = node.find_topic(name) {
            if last {
                env.print(&assembler.formatter().fill(&topic.long, 0))?;
                return Ok(());
            }
            // Topics are leaves; whatever follows cannot resolve.
            let next = &names[idx + 1];
            let message = format!("{path}: unknown command or topic {next:?}");
            return fail(env, assembler, &node, &path, message);
        }
        let message = format!("{path}: unknown command or topic {name:?}");
        return fail(env, assembler, &node, &path, message);
    }

    env.print(&assembler.full(&node, &path))?;
    Ok(())
}

/// Declared children first, then the synthesized help command. Only a
/// borrowed node can have declared children; the synthesized one has none.
fn lookup_child<'c>(node: &Cow<'c, Command>, name: &str) -> Option<Cow<'c, Command>> {
    if let Cow::Borrowed(node) = node {
        if let Some(child) = node.find_child(name) {
            return Some(Cow::Borrowed(child));
        }
    }
    if name == HELP_NAME && node.has_children() {
        return Some(Cow::Owned(help_command()));
    }
    None
}

/// Print a usage error block for `node` and return the usage sentinel.
pub(crate) fn fail(
    env: &mut Env<'_>,
    assembler: Assembler<'_>,
    node: &Command,
    path: &str,
    message: String,
) -> Result<(), Error> {
    env.eprint(&assembler.error_block(node, path, &message))?;
    Err(Error::Usage { message })
}
