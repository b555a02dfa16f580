//! Text formatting commands.

use cmdline::{Command, Context, Error, FlagSet, TextFormatter, Width};

use super::emit;
use crate::error::DemoError;

pub fn command() -> Command {
    Command::new("text")
        .short("Text formatting commands")
        .long("Text groups commands that reshape their arguments.")
        .children([wrap(), upper()])
}

fn wrap() -> Command {
    Command::new("wrap")
        .short("Reflow words to a width")
        .long(
            "Wrap joins its arguments into one paragraph and reflows it. Words longer
than the width are never split.",
        )
        .flags(FlagSet::new().int(
            "width",
            0,
            "Target width in runes; 0 uses the help output width",
        ))
        .args("[words]", "[words] are the words to reflow.")
        .run(run_wrap)
}

fn run_wrap(ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error> {
    if args.is_empty() {
        return Err(ctx.usage_error("text wrap: no words given"));
    }
    let width = match ctx.int_flag("width").unwrap_or(0) {
        0 => ctx.width(),
        w if w > 0 => Width::Limited(usize::try_from(w).map_err(Error::run)?),
        w => return Err(Error::run(DemoError::Width(w))),
    };
    let text = TextFormatter::new(width).fill(&args.join(" "), 0);
    emit(ctx, text.trim_end_matches('\n'), true)
}

fn upper() -> Command {
    Command::new("upper")
        .short("Print strings in upper case")
        .args("[strings]", "[strings] are printed in upper case.")
        .run(|ctx: &mut Context<'_, '_>, args: &[String]| -> Result<(), Error> {
            emit(ctx, &args.join(" ").to_uppercase(), true)
        })
}
