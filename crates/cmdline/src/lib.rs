//! Hierarchical command dispatch and help generation.
//!
//! A program is a tree of [`Command`]s. Each level has its own [`FlagSet`],
//! an optional handler and help-only [`Topic`]s. [`Program::execute`] walks
//! the arguments down the tree, parsing each level's flags before the next
//! command name, and runs the handler it lands on. Every node with children
//! also answers to a built-in `help` command.
//!
//! ```no_run
//! use std::io::Write;
//!
//! use cmdline::{Command, Env, Error, FlagSet, Program};
//!
//! let echo = Command::new("echo")
//!     .short("Print strings on stdout")
//!     .args("[strings]", "[strings] are arbitrary strings that will be echoed.")
//!     .run(|ctx: &mut cmdline::Context<'_, '_>, args: &[String]| -> Result<(), Error> {
//!         writeln!(ctx.stdout(), "{}", args.join(" "))?;
//!         Ok(())
//!     });
//! let program = Program::new(Command::new("prog").child(echo), FlagSet::new());
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let result = program.execute(&mut Env::stdio(), &args);
//! # let _ = result;
//! ```

pub mod command;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod flags;
pub mod help;
pub mod text;
mod usage;

pub use command::{Command, ConfigIssue, Runner, Topic};
pub use context::{Context, Env};
pub use dispatch::Program;
pub use error::{BoxError, Error};
pub use flags::{FlagError, FlagSet, FlagValue, FlagValues};
pub use help::Style;
pub use text::{TextFormatter, Width};
