// Reconciliation passes.
//
// Each resource kind follows the same pipeline: fetch current state,
// plan the minimal set of mutations (pure), then apply the plan unless
// preview mode is on. Planning never touches the network, so a preview
// run produces the exact outcome an apply run would report.

mod group;
mod policy;
mod retention;
mod user;

use miosync_api::{AdminClient, AdminCode};
use tracing::{debug, info};

use crate::diff::Diff;
use crate::error::CoreError;
use crate::model::{GroupSpec, PolicySpec, PolicyState, RetentionSpec, UserSpec, UserState};
use crate::outcome::Outcome;
use crate::plan::{MutationPlan, Operation, Principal};
use crate::state::ResourceState;

/// The result of planning one pass: what would change, the mutations
/// to get there, and a summary message.
#[derive(Debug)]
pub(crate) struct Pass {
    pub diff: Diff,
    pub plan: MutationPlan,
    pub message: String,
}

impl Pass {
    /// A pass changed something exactly when its plan is non-empty.
    pub fn outcome(&self) -> Outcome {
        Outcome::new(!self.plan.is_empty(), self.message.clone(), &self.diff)
    }
}

// ── Entry points ─────────────────────────────────────────────────────

/// Reconcile one group towards its spec.
pub async fn reconcile_group(
    client: &AdminClient,
    spec: &GroupSpec,
    preview: bool,
) -> Result<Outcome, CoreError> {
    info!(group = %spec.name, ?preview, "reconciling group");
    let current = fetch_group(client, &spec.name).await?;
    let pass = group::plan(&current, spec);
    apply(client, &pass, &format!("group '{}'", spec.name), preview).await?;
    Ok(pass.outcome())
}

/// Reconcile one canned policy (document and associations).
pub async fn reconcile_policy(
    client: &AdminClient,
    spec: &PolicySpec,
    preview: bool,
) -> Result<Outcome, CoreError> {
    if spec.state == PolicyState::Present && spec.statements.is_none() {
        return Err(CoreError::InvalidSpec(format!(
            "policy '{}': statements are required when the policy should be present",
            spec.name
        )));
    }
    info!(policy = %spec.name, ?preview, "reconciling policy");
    let current = fetch_policy(client, &spec.name).await?;
    let pass = policy::plan(&current, spec);
    apply(client, &pass, &format!("policy '{}'", spec.name), preview).await?;
    Ok(pass.outcome())
}

/// Reconcile one user towards its spec.
pub async fn reconcile_user(
    client: &AdminClient,
    spec: &UserSpec,
    preview: bool,
) -> Result<Outcome, CoreError> {
    info!(user = %spec.access_key, ?preview, "reconciling user");
    let current = fetch_user(client, &spec.access_key).await?;
    if spec.state == UserState::Present && !current.is_present() && spec.secret_key.is_none() {
        return Err(CoreError::InvalidSpec(format!(
            "user '{}': a secret key is required to create the user",
            spec.access_key
        )));
    }
    let pass = user::plan(&current, spec);
    apply(client, &pass, &format!("user '{}'", spec.access_key), preview).await?;
    Ok(pass.outcome())
}

/// Reconcile one bucket's default retention rule.
///
/// The object-lock configuration is write-only on this surface, so
/// there is no fetch step and a pass that writes always reports a
/// change.
pub async fn reconcile_retention(
    client: &AdminClient,
    spec: &RetentionSpec,
    preview: bool,
) -> Result<Outcome, CoreError> {
    info!(bucket = %spec.bucket, ?preview, "reconciling retention");
    let pass = retention::plan(spec);
    apply(client, &pass, &format!("bucket '{}'", spec.bucket), preview).await?;
    Ok(pass.outcome())
}

// ── State fetchers ───────────────────────────────────────────────────
//
// Absence is recognized only by the structured admin code for the
// resource kind in question. Any other failure propagates.

async fn fetch_group(client: &AdminClient, name: &str) -> Result<ResourceState, CoreError> {
    match client.group_info(name).await {
        Ok(doc) => Ok(ResourceState::Present(doc)),
        Err(err) if err.admin_code() == Some(&AdminCode::NoSuchGroup) => Ok(ResourceState::Absent),
        Err(source) => Err(CoreError::Fetch {
            resource: format!("group '{name}'"),
            source,
        }),
    }
}

async fn fetch_policy(client: &AdminClient, name: &str) -> Result<ResourceState, CoreError> {
    match client.info_canned_policy(name).await {
        Ok(doc) => Ok(ResourceState::Present(doc)),
        Err(err) if err.admin_code() == Some(&AdminCode::NoSuchPolicy) => Ok(ResourceState::Absent),
        Err(source) => Err(CoreError::Fetch {
            resource: format!("policy '{name}'"),
            source,
        }),
    }
}

async fn fetch_user(client: &AdminClient, access_key: &str) -> Result<ResourceState, CoreError> {
    match client.user_info(access_key).await {
        Ok(doc) => Ok(ResourceState::Present(doc)),
        Err(err) if err.admin_code() == Some(&AdminCode::NoSuchUser) => Ok(ResourceState::Absent),
        Err(source) => Err(CoreError::Fetch {
            resource: format!("user '{access_key}'"),
            source,
        }),
    }
}

// ── Applier ──────────────────────────────────────────────────────────

/// Execute the plan in order, or skip it entirely in preview mode.
async fn apply(
    client: &AdminClient,
    pass: &Pass,
    resource: &str,
    preview: bool,
) -> Result<(), CoreError> {
    if preview {
        debug!(
            "preview: skipping {} planned operation(s) for {resource}",
            pass.plan.len()
        );
        return Ok(());
    }
    for op in pass.plan.iter() {
        debug!("applying '{}' for {resource}", op.verb());
        execute(client, op)
            .await
            .map_err(|source| CoreError::Apply {
                operation: op.verb().to_owned(),
                resource: resource.to_owned(),
                outcome: Box::new(pass.outcome()),
                source,
            })?;
    }
    Ok(())
}

async fn execute(client: &AdminClient, op: &Operation) -> Result<(), miosync_api::Error> {
    match op {
        Operation::CreateGroup { group, members } => {
            client.update_group_members(group, members, false).await
        }
        Operation::AddMembers { group, members } => {
            let members: Vec<String> = members.iter().cloned().collect();
            client.update_group_members(group, &members, false).await
        }
        Operation::RemoveMembers { group, members } => {
            let members: Vec<String> = members.iter().cloned().collect();
            client.update_group_members(group, &members, true).await
        }
        Operation::EnableGroup { group } => client.set_group_status(group, true).await,
        Operation::DisableGroup { group } => client.set_group_status(group, false).await,
        // An empty removal deletes the group itself.
        Operation::DeleteGroup { group } => client.update_group_members(group, &[], true).await,
        Operation::CreatePolicy { policy, document } => {
            client.add_canned_policy(policy, document).await
        }
        Operation::DeletePolicy { policy } => client.remove_canned_policy(policy).await,
        Operation::AttachPolicy { policy, principal } => match principal {
            Principal::User(user) => client.attach_policy(policy, Some(user), None).await,
            Principal::Group(group) => client.attach_policy(policy, None, Some(group)).await,
        },
        Operation::DetachPolicy { policy, principal } => match principal {
            Principal::User(user) => client.detach_policy(policy, Some(user), None).await,
            Principal::Group(group) => client.detach_policy(policy, None, Some(group)).await,
        },
        Operation::CreateUser {
            access_key,
            secret_key,
        } => client.add_user(access_key, secret_key).await,
        Operation::DisableUser { access_key } => client.set_user_status(access_key, false).await,
        Operation::DeleteUser { access_key } => client.remove_user(access_key).await,
        Operation::SetRetention { bucket, mode, days } => {
            client.set_object_lock_config(bucket, (*mode).into(), *days).await
        }
        Operation::ClearRetention { bucket } => client.clear_object_lock_config(bucket).await,
    }
}
