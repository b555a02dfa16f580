use cmdline::{Command, Context, Error, FlagSet};

use super::emit;

pub fn command() -> Command {
    Command::new("echo")
        .short("Print strings on stdout")
        .long("Echo prints its arguments, separated by single spaces.")
        .flags(FlagSet::new().bool("n", false, "Do not output trailing newline"))
        .args("[strings]", "[strings] are arbitrary strings that will be echoed.")
        .run(run)
}

fn run(ctx: &mut Context<'_, '_>, args: &[String]) -> Result<(), Error> {
    let newline = !ctx.bool_flag("n");
    emit(ctx, &args.join(" "), newline)
}
