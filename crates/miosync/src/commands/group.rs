//! Group command handler.

use miosync_core::{reconcile_group, AdminClient, GroupSpec, GroupState};

use crate::cli::{GlobalOpts, GroupArgs, GroupStateArg};
use crate::error::CliError;

fn map_state(state: GroupStateArg) -> GroupState {
    match state {
        GroupStateArg::Present => GroupState::Present,
        GroupStateArg::Absent => GroupState::Absent,
        GroupStateArg::Disabled => GroupState::Disabled,
    }
}

pub async fn handle(
    client: &AdminClient,
    args: GroupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let spec = GroupSpec {
        name: args.name,
        state: map_state(args.state),
        users: args.users,
    };

    let outcome = reconcile_group(client, &spec, global.check).await?;
    super::report(&outcome, global);
    Ok(())
}
