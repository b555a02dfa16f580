//! Text formatting: paragraph wrapping and two-column tables.

use textwrap::core::{Fragment, Word};
use textwrap::wrap_algorithms::wrap_first_fit;
use textwrap::WordSeparator;
use tracing::warn;

use crate::config::{vars, Environment};

/// Width used when neither the override nor the terminal gives one.
pub const DEFAULT_WIDTH: usize = 80;

/// Minimum width of the name column in command and topic tables.
const MIN_NAME_WIDTH: usize = 11;

/// Indent of table rows and usage lines.
const TABLE_INDENT: usize = 3;

/// Target output width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Wrap lines at this many columns.
    Limited(usize),
    /// Never wrap.
    Unlimited,
}

impl Default for Width {
    fn default() -> Self {
        Self::Limited(DEFAULT_WIDTH)
    }
}

impl Width {
    /// Resolve the width from an override and a terminal probe.
    ///
    /// An override above zero is used as is and one below zero means
    /// unlimited. Zero or no override falls through to the probe, then to
    /// [`DEFAULT_WIDTH`].
    pub fn resolve<F>(override_width: Option<i64>, probe: F) -> Self
    where
        F: FnOnce() -> Option<usize>,
    {
        match override_width {
            Some(w) if w > 0 => Self::Limited(usize::try_from(w).unwrap_or(usize::MAX)),
            Some(w) if w < 0 => Self::Unlimited,
            _ => match probe() {
                Some(w) if w > 0 => Self::Limited(w),
                _ => Self::Limited(DEFAULT_WIDTH),
            },
        }
    }

    /// Resolve from `CMDLINE_WIDTH` and the attached terminal.
    pub fn from_env() -> Self {
        let override_width = match Environment::get_int::<i64>(vars::CMDLINE_WIDTH) {
            Ok(value) => value,
            Err(e) => {
                warn!("ignoring {}: {}", vars::CMDLINE_WIDTH, e);
                None
            }
        };
        Self::resolve(override_width, terminal_width)
    }

    /// Columns for full-width decorations; unlimited falls back to the default.
    pub fn columns(&self) -> usize {
        match self {
            Self::Limited(w) => *w,
            Self::Unlimited => DEFAULT_WIDTH,
        }
    }
}

fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| usize::from(w))
}

/// Text formatter bound to a target width.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    width: Width,
}

impl TextFormatter {
    /// A formatter wrapping at `width`.
    pub fn new(width: Width) -> Self {
        Self { width }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Reflow `text` into lines, each ending in a newline.
    ///
    /// Surrounding whitespace is trimmed. Paragraphs are separated by one
    /// blank line in the output; lines that start with whitespace are kept
    /// verbatim.
    pub fn fill(&self, text: &str, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut out = String::new();
        for (idx, paragraph) in paragraphs(text.trim()).iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            for chunk in paragraph {
                match chunk {
                    Chunk::Flow(line) => {
                        for wrapped in self.wrap_line(line, &pad, &pad) {
                            out.push_str(&wrapped);
                            out.push('\n');
                        }
                    }
                    Chunk::Verbatim(line) => {
                        out.push_str(&pad);
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    /// Render `(name, description)` rows as an aligned table.
    ///
    /// The name column is as wide as the longest name (at least eleven runes)
    /// plus one space; wrapped descriptions hang under the first description
    /// column.
    pub fn table<'r, I>(&self, rows: I) -> String
    where
        I: IntoIterator<Item = (&'r str, &'r str)>,
    {
        let rows: Vec<(&str, &str)> = rows.into_iter().collect();
        let name_width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH);

        let hang = " ".repeat(TABLE_INDENT + name_width + 1);
        let mut out = String::new();
        for (name, desc) in rows {
            let pad = name_width - name.chars().count();
            let lead = format!("{}{}{} ", " ".repeat(TABLE_INDENT), name, " ".repeat(pad));
            let desc = join_flow(desc.trim());
            if desc.is_empty() {
                out.push_str(lead.trim_end());
                out.push('\n');
                continue;
            }
            for line in self.wrap_line(&desc, &lead, &hang) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    /// A rule line of `ch` spanning the width, with a trailing newline.
    pub fn rule(&self, ch: char) -> String {
        let mut line: String = std::iter::repeat(ch).take(self.width.columns()).collect();
        line.push('\n');
        line
    }

    /// Greedy wrap of one flowed line. Widths are counted in runes, so a
    /// wide character takes one column like any other.
    fn wrap_line(&self, line: &str, first: &str, rest: &str) -> Vec<String> {
        let width = match self.width {
            Width::Unlimited => return vec![format!("{first}{line}")],
            Width::Limited(width) => width,
        };
        let words: Vec<RuneWord<'_>> = WordSeparator::AsciiSpace
            .find_words(line)
            .map(RuneWord)
            .collect();
        let line_widths = [
            width.saturating_sub(first.chars().count()) as f64,
            width.saturating_sub(rest.chars().count()) as f64,
        ];

        let lines: Vec<String> = wrap_first_fit(&words, &line_widths)
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let indent = if idx == 0 { first } else { rest };
                let Some((last, init)) = row.split_last() else {
                    return indent.trim_end().to_string();
                };
                let mut out = indent.to_string();
                for word in init {
                    out.push_str(word.0.word);
                    out.push_str(word.0.whitespace);
                }
                out.push_str(last.0.word);
                out
            })
            .collect();
        lines
    }
}

/// A word measured in runes.
#[derive(Debug)]
struct RuneWord<'a>(Word<'a>);

impl Fragment for RuneWord<'_> {
    fn width(&self) -> f64 {
        self.0.word.chars().count() as f64
    }

    fn whitespace_width(&self) -> f64 {
        self.0.whitespace.chars().count() as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

enum Chunk<'a> {
    Flow(String),
    Verbatim(&'a str),
}

/// Split trimmed text into paragraphs of flowed and verbatim chunks.
fn paragraphs(text: &str) -> Vec<Vec<Chunk<'_>>> {
    let mut out = Vec::new();
    let mut current: Vec<Chunk<'_>> = Vec::new();
    let mut flow: Vec<&str> = Vec::new();

    fn flush<'a>(flow: &mut Vec<&'a str>, current: &mut Vec<Chunk<'a>>) {
        if !flow.is_empty() {
            current.push(Chunk::Flow(flow.join(" ")));
            flow.clear();
        }
    }

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut flow, &mut current);
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else if line.starts_with(char::is_whitespace) {
            flush(&mut flow, &mut current);
            current.push(Chunk::Verbatim(line.trim_end()));
        } else {
            flow.push(line.trim_end());
        }
    }
    flush(&mut flow, &mut current);
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn join_flow(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
