//! User command handler.

use secrecy::SecretString;

use miosync_core::{reconcile_user, AdminClient, UserSpec, UserState};

use crate::cli::{GlobalOpts, UserArgs, UserStateArg};
use crate::error::CliError;

fn map_state(state: UserStateArg) -> UserState {
    match state {
        UserStateArg::Present => UserState::Present,
        UserStateArg::Absent => UserState::Absent,
        UserStateArg::Disabled => UserState::Disabled,
    }
}

pub async fn handle(
    client: &AdminClient,
    args: UserArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let spec = UserSpec {
        access_key: args.access_key,
        state: map_state(args.state),
        secret_key: args.user_secret_key.map(SecretString::from),
    };

    let outcome = reconcile_user(client, &spec, global.check).await?;
    super::report(&outcome, global);
    Ok(())
}
