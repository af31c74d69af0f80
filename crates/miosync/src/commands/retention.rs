//! Retention command handler.

use miosync_core::{reconcile_retention, AdminClient, RetentionMode, RetentionSpec, RetentionState};

use crate::cli::{GlobalOpts, RetentionArgs, RetentionModeArg, RetentionStateArg};
use crate::error::CliError;

fn map_state(state: RetentionStateArg) -> RetentionState {
    match state {
        RetentionStateArg::Present => RetentionState::Present,
        RetentionStateArg::Absent => RetentionState::Absent,
    }
}

fn map_mode(mode: RetentionModeArg) -> RetentionMode {
    match mode {
        RetentionModeArg::Governance => RetentionMode::Governance,
        RetentionModeArg::Compliance => RetentionMode::Compliance,
    }
}

pub async fn handle(
    client: &AdminClient,
    args: RetentionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let spec = RetentionSpec {
        bucket: args.bucket,
        state: map_state(args.state),
        mode: args.mode.map(map_mode),
        days: args.days,
    };

    let outcome = reconcile_retention(client, &spec, global.check).await?;
    super::report(&outcome, global);
    Ok(())
}
