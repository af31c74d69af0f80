//! Command dispatch: bridges CLI args -> core reconcilers -> output.

pub mod config_cmd;
pub mod group;
pub mod policy;
pub mod retention;
pub mod user;
mod util;

use miosync_core::{AdminClient, Outcome};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &AdminClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Group(args) => group::handle(client, args, global).await,
        Command::Policy(args) => policy::handle(client, args, global).await,
        Command::User(args) => user::handle(client, args, global).await,
        Command::Retention(args) => retention::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Render and print one reconciliation outcome.
fn report(outcome: &Outcome, global: &GlobalOpts) {
    let out = output::render_outcome(
        &global.output,
        outcome,
        output::should_color(&global.color),
    );
    output::print_output(&out, global.quiet);
}
