// miosync-core: desired-state reconciliation for MinIO resources.
//
// Pipeline per resource kind: normalize the endpoint, fetch current
// state, canonicalize both sides, plan the minimal mutations, then
// apply (or just report, in preview mode).

pub mod canonical;
pub mod diff;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod outcome;
pub mod plan;
pub mod reconcile;
pub mod server;
pub mod state;

pub use miosync_api::AdminClient;

pub use endpoint::Endpoint;
pub use error::CoreError;
pub use model::{
    GroupSpec, GroupState, PolicySpec, PolicyState, RetentionMode, RetentionSpec, RetentionState,
    UserSpec, UserState,
};
pub use outcome::Outcome;
pub use reconcile::{reconcile_group, reconcile_policy, reconcile_retention, reconcile_user};
pub use server::ServerConfig;
pub use state::ResourceState;
