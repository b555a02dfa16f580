use cmdline::{Command, Context, Error};

use super::emit;
use crate::error::DemoError;

pub fn command() -> Command {
    Command::new("sum")
        .short("Add integers")
        .long("Sum prints the sum of its integer arguments.")
        .args("[integers]", "[integers] are signed 64-bit integers.")
        .run(run)
}

fn run(ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error> {
    let mut total: i64 = 0;
    for arg in args {
        let Ok(value) = arg.parse::<i64>() else {
            return Err(ctx.usage_error(format!("{arg:?} is not an integer")));
        };
        total = total
            .checked_add(value)
            .ok_or_else(|| Error::run(DemoError::Overflow))?;
    }
    emit(ctx, &total.to_string(), true)
}
