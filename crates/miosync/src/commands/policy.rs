//! Policy command handler.

use miosync_core::{reconcile_policy, AdminClient, PolicySpec, PolicyState};

use crate::cli::{GlobalOpts, PolicyArgs, PolicyStateArg};
use crate::error::CliError;

use super::util;

fn map_state(state: PolicyStateArg) -> PolicyState {
    match state {
        PolicyStateArg::Present => PolicyState::Present,
        PolicyStateArg::Absent => PolicyState::Absent,
    }
}

pub async fn handle(
    client: &AdminClient,
    args: PolicyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let statements = args
        .statements_file
        .as_deref()
        .map(util::read_statements)
        .transpose()?;

    let spec = PolicySpec {
        name: args.name,
        state: map_state(args.state),
        statements,
        users: args.users,
        groups: args.groups,
    };

    let outcome = reconcile_policy(client, &spec, global.check).await?;
    super::report(&outcome, global);
    Ok(())
}
