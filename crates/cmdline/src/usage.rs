//! Usage text for one resolved command.

use crate::command::{help_command, Command, NOT_EXECUTABLE};
use crate::flags::FlagSet;
use crate::text::TextFormatter;

/// How much of the help a block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Depth {
    /// The block the user asked for: includes the help entry, the hint
    /// lines and the global flags.
    First,
    /// A block nested in a recursive dump.
    Nested,
}

/// Assembles usage blocks from the tree and the global flag schema.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Assembler<'a> {
    fmt: TextFormatter,
    globals: &'a FlagSet,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(fmt: TextFormatter, globals: &'a FlagSet) -> Self {
        Self { fmt, globals }
    }

    pub(crate) fn formatter(&self) -> &TextFormatter {
        &self.fmt
    }

    /// The full help for `node`, as printed by `help` with no arguments.
    pub(crate) fn full(&self, node: &Command, path: &str) -> String {
        self.render(node, path, Depth::First)
    }

    /// The block written to the error sink for a usage failure.
    pub(crate) fn error_block(&self, node: &Command, path: &str, message: &str) -> String {
        format!("ERROR: {message}\n\n{}", self.full(node, path))
    }

    pub(crate) fn render(&self, node: &Command, path: &str, depth: Depth) -> String {
        let mut out = String::new();
        let first = depth == Depth::First;

        let long = node.long_desc().trim();
        if !long.is_empty() {
            out.push_str(&self.fmt.fill(long, 0));
            out.push('\n');
        }

        out.push_str("Usage:\n");
        let flags = if node.flag_set().is_empty() { "" } else { " [flags]" };
        if node.has_children() {
            out.push_str(&format!("   {path}{flags} <command>\n"));
        }
        if node.has_run() {
            let mut line = format!("   {path}{flags}");
            if !node.args_name().is_empty() {
                line.push(' ');
                line.push_str(node.args_name());
            }
            out.push_str(&line);
            out.push('\n');
        }
        if !node.is_executable() {
            out.push_str(&format!("   {path} [ERROR: {NOT_EXECUTABLE}]\n"));
        }

        if node.has_children() {
            out.push_str(&format!("\nThe {path} commands are:\n"));
            let help = help_command();
            let mut rows: Vec<(&str, &str)> = node
                .child_commands()
                .iter()
                .map(|c| (c.name(), c.short_desc()))
                .collect();
            if first {
                rows.push((help.name(), help.short_desc()));
            }
            out.push_str(&self.fmt.table(rows));
            if first {
                out.push_str(&format!(
                    "Run \"{path} help [command]\" for command usage.\n"
                ));
            }
        }

        if node.has_run() && !node.args_long().trim().is_empty() {
            out.push('\n');
            out.push_str(&self.fmt.fill(node.args_long(), 0));
        }

        if !node.topic_list().is_empty() {
            out.push_str(&format!("\nThe {path} additional help topics are:\n"));
            let rows = node
                .topic_list()
                .iter()
                .map(|t| (t.name.as_str(), t.short.as_str()));
            out.push_str(&self.fmt.table(rows));
            if first {
                out.push_str(&format!("Run \"{path} help [topic]\" for topic details.\n"));
            }
        }

        if !node.flag_set().is_empty() {
            out.push_str(&format!("\nThe {path} flags are:\n"));
            out.push_str(&self.flag_list(node.flag_set()));
        }

        if first {
            out.push_str("\nThe global flags are:\n");
            out.push_str(&self.flag_list(self.globals));
        }

        out
    }

    fn flag_list(&self, set: &FlagSet) -> String {
        let mut out = String::new();
        for flag in set.iter() {
            out.push_str(&format!(" -{}={}\n", flag.name(), flag.default_value()));
            out.push_str(&self.fmt.fill(flag.usage(), 3));
        }
        out
    }
}
