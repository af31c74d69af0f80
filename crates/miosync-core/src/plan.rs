// Mutation planning types.
//
// A plan is the ordered list of API calls a reconciliation pass would
// make. Planning is pure; execution lives in `reconcile`.

use std::collections::BTreeSet;

use secrecy::SecretString;

use crate::model::RetentionMode;

/// A principal a policy can be associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User(String),
    Group(String),
}

impl Principal {
    pub fn name(&self) -> &str {
        match self {
            Self::User(name) | Self::Group(name) => name,
        }
    }
}

/// One server mutation. Order within a plan is significant: a group is
/// enabled before its membership changes, a policy is created before
/// it is attached.
#[derive(Debug, Clone)]
pub enum Operation {
    // ── Groups ──────────────────────────────────────────────────────
    CreateGroup { group: String, members: Vec<String> },
    AddMembers { group: String, members: BTreeSet<String> },
    RemoveMembers { group: String, members: BTreeSet<String> },
    EnableGroup { group: String },
    DisableGroup { group: String },
    DeleteGroup { group: String },

    // ── Policies ────────────────────────────────────────────────────
    CreatePolicy { policy: String, document: serde_json::Value },
    DeletePolicy { policy: String },
    AttachPolicy { policy: String, principal: Principal },
    DetachPolicy { policy: String, principal: Principal },

    // ── Users ───────────────────────────────────────────────────────
    CreateUser { access_key: String, secret_key: SecretString },
    DisableUser { access_key: String },
    DeleteUser { access_key: String },

    // ── Retention ───────────────────────────────────────────────────
    SetRetention { bucket: String, mode: RetentionMode, days: u32 },
    ClearRetention { bucket: String },
}

impl Operation {
    /// Short verb for logs and error context.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::CreateGroup { .. } => "create group",
            Self::AddMembers { .. } => "add members",
            Self::RemoveMembers { .. } => "remove members",
            Self::EnableGroup { .. } => "enable group",
            Self::DisableGroup { .. } => "disable group",
            Self::DeleteGroup { .. } => "delete group",
            Self::CreatePolicy { .. } => "create policy",
            Self::DeletePolicy { .. } => "delete policy",
            Self::AttachPolicy { .. } => "attach policy",
            Self::DetachPolicy { .. } => "detach policy",
            Self::CreateUser { .. } => "create user",
            Self::DisableUser { .. } => "disable user",
            Self::DeleteUser { .. } => "delete user",
            Self::SetRetention { .. } => "set retention",
            Self::ClearRetention { .. } => "clear retention",
        }
    }
}

/// Ordered list of mutations for one reconciliation pass.
///
/// An empty plan means the pass changes nothing.
#[derive(Debug, Clone, Default)]
pub struct MutationPlan {
    ops: Vec<Operation>,
}

impl MutationPlan {
    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter()
    }
}
