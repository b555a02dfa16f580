//! Option definitions and the single-dash option parser.
//!
//! Options are scoped to one level of the command tree. Parsing consumes the
//! longest prefix of option tokens and leaves the rest for command resolution.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;
use tracing::trace;

/// A typed option value. The variant of a flag's default fixes its type.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// A switch; `-name` alone sets it.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// Any string.
    Str(String),
}

impl FlagValue {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Parse `raw` into a value of the same type as `self`.
    fn parse_same(&self, raw: &str) -> Result<Self, String> {
        match self {
            Self::Bool(_) => parse_bool(raw)
                .map(Self::Bool)
                .ok_or_else(|| "invalid syntax".to_string()),
            Self::Int(_) => raw.parse().map(Self::Int).map_err(|e| format!("{e}")),
            Self::Uint(_) => raw.parse().map(Self::Uint).map_err(|e| format!("{e}")),
            Self::Float(_) => raw.parse().map(Self::Float).map_err(|e| format!("{e}")),
            Self::Str(_) => Ok(Self::Str(raw.to_string())),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// One declared option.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    usage: String,
    default: FlagValue,
    choices: Vec<String>,
}

impl Flag {
    /// Name without the leading dash.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description shown under the flag in help.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn default_value(&self) -> &FlagValue {
        &self.default
    }

    /// Allowed values for a choice flag; empty for unrestricted flags.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    fn parse_value(&self, raw: &str) -> Result<FlagValue, FlagError> {
        if !self.choices.is_empty() && !self.choices.iter().any(|c| c == raw) {
            let allowed = self
                .choices
                .iter()
                .map(|c| format!("{c:?}"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(FlagError::InvalidValue {
                name: self.name.clone(),
                value: raw.to_string(),
                reason: format!("must be one of {allowed}"),
            });
        }
        self.default.parse_same(raw).map_err(|reason| {
            if self.default.is_bool() {
                FlagError::InvalidBool {
                    name: self.name.clone(),
                    value: raw.to_string(),
                }
            } else {
                FlagError::InvalidValue {
                    name: self.name.clone(),
                    value: raw.to_string(),
                    reason,
                }
            }
        })
    }
}

/// The option schema of one command level, kept sorted by name.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: BTreeMap<String, Flag>,
}

impl FlagSet {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a bool flag.
    pub fn bool(self, name: impl Into<String>, default: bool, usage: impl Into<String>) -> Self {
        self.define(name, FlagValue::Bool(default), usage, Vec::new())
    }

    /// Declare a string flag.
    pub fn string(
        self,
        name: impl Into<String>,
        default: impl Into<String>,
        usage: impl Into<String>,
    ) -> Self {
        self.define(name, FlagValue::Str(default.into()), usage, Vec::new())
    }

    /// Declare a signed integer flag.
    pub fn int(self, name: impl Into<String>, default: i64, usage: impl Into<String>) -> Self {
        self.define(name, FlagValue::Int(default), usage, Vec::new())
    }

    /// Declare an unsigned integer flag.
    pub fn uint(self, name: impl Into<String>, default: u64, usage: impl Into<String>) -> Self {
        self.define(name, FlagValue::Uint(default), usage, Vec::new())
    }

    /// Declare a float flag.
    pub fn float(self, name: impl Into<String>, default: f64, usage: impl Into<String>) -> Self {
        self.define(name, FlagValue::Float(default), usage, Vec::new())
    }

    /// A string flag restricted to `choices`.
    pub fn choice(
        self,
        name: impl Into<String>,
        default: impl Into<String>,
        choices: &[&str],
        usage: impl Into<String>,
    ) -> Self {
        let choices = choices.iter().map(|c| c.to_string()).collect();
        self.define(name, FlagValue::Str(default.into()), usage, choices)
    }

    fn define(
        mut self,
        name: impl Into<String>,
        default: FlagValue,
        usage: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        let name = name.into();
        self.flags.insert(
            name.clone(),
            Flag {
                name,
                usage: usage.into(),
                default,
                choices,
            },
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// The flag declared as `name`.
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Values holding every default.
    pub fn defaults(&self) -> FlagValues {
        FlagValues {
            values: self
                .flags
                .values()
                .map(|flag| (flag.name.clone(), flag.default.clone()))
                .collect(),
            explicit: BTreeSet::new(),
        }
    }
}

/// Parsed values for one [`FlagSet`]: defaults overlaid by the parsed tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagValues {
    values: BTreeMap<String, FlagValue>,
    explicit: BTreeSet<String>,
}

impl FlagValues {
    /// Value of `name`, parsed or default.
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FlagValue::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FlagValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FlagValue::as_int)
    }

    /// Whether the flag appeared on the command line.
    pub fn is_set(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    fn set(&mut self, name: &str, value: FlagValue) {
        self.values.insert(name.to_string(), value);
        self.explicit.insert(name.to_string());
    }
}

/// Option parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("flag provided but not defined: -{0}")]
    NotDefined(String),

    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("invalid boolean value {value:?} for -{name}")]
    InvalidBool { name: String, value: String },

    #[error("invalid value {value:?} for flag -{name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// `-h` or `-help` was given and neither is declared.
    #[error("help requested")]
    HelpRequested,
}

/// Result of [`parse`]: one [`FlagValues`] per input set, plus the tokens left over.
#[derive(Debug)]
pub struct Parsed<'a> {
    /// Values in the order of the sets passed to [`parse`].
    pub values: Vec<FlagValues>,
    /// Tokens after the options.
    pub rest: &'a [String],
}

/// Parse the leading option tokens of `args` against `sets`.
///
/// A name is looked up in each set in order and the first declaration wins.
/// Parsing stops at the first non-option token, at `-`, or after `--`.
pub fn parse<'a>(sets: &[&FlagSet], args: &'a [String]) -> Result<Parsed<'a>, FlagError> {
    let mut values: Vec<FlagValues> = sets.iter().map(|set| set.defaults()).collect();
    let mut idx = 0;

    while idx < args.len() {
        let arg = args[idx].as_str();
        if arg.len() < 2 || !arg.starts_with('-') {
            break;
        }
        idx += 1;

        let mut name = &arg[1..];
        if let Some(stripped) = name.strip_prefix('-') {
            if stripped.is_empty() {
                // "--" terminates the options.
                break;
            }
            name = stripped;
        }
        if name.is_empty() || name.starts_with('-') || name.starts_with('=') {
            return Err(FlagError::BadSyntax(arg.to_string()));
        }

        let (name, inline) = match name.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (name, None),
        };

        let Some((slot, flag)) = sets
            .iter()
            .enumerate()
            .find_map(|(slot, set)| set.lookup(name).map(|flag| (slot, flag)))
        else {
            if name == "help" || name == "h" {
                return Err(FlagError::HelpRequested);
            }
            return Err(FlagError::NotDefined(name.to_string()));
        };

        let value = match (flag.default.is_bool(), inline) {
            (true, None) => FlagValue::Bool(true),
            (_, Some(raw)) => flag.parse_value(raw)?,
            (false, None) => {
                let raw = args
                    .get(idx)
                    .ok_or_else(|| FlagError::MissingValue(name.to_string()))?;
                idx += 1;
                flag.parse_value(raw)?
            }
        };

        trace!("parsed flag -{}={}", name, value);
        values[slot].set(name, value);
    }

    Ok(Parsed {
        values,
        rest: &args[idx..],
    })
}
