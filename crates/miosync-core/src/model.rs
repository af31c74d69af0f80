// Desired-state specifications, one per resource kind.
//
// These are the inputs to the planners: what the caller wants the
// server to look like, independent of how it currently looks.

use secrecy::SecretString;

/// Desired state for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Present,
    Absent,
    Disabled,
}

/// Desired state for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserState {
    Present,
    Absent,
    Disabled,
}

/// Desired state for a canned policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyState {
    Present,
    Absent,
}

/// Desired state for a bucket's default retention rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionState {
    Present,
    Absent,
}

/// Object-lock retention mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionMode {
    Governance,
    Compliance,
}

impl From<RetentionMode> for miosync_api::LockMode {
    fn from(mode: RetentionMode) -> Self {
        match mode {
            RetentionMode::Governance => Self::Governance,
            RetentionMode::Compliance => Self::Compliance,
        }
    }
}

/// Desired shape of one group.
///
/// `users: None` means "leave membership alone"; `Some(vec![])` means
/// "the group must have no members".
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub name: String,
    pub state: GroupState,
    pub users: Option<Vec<String>>,
}

/// Desired shape of one canned policy.
///
/// `statements` is the IAM `Statement` array; required when the state
/// is `Present`. `users` and `groups` name principals the policy is
/// attached to (or detached from, when absent).
#[derive(Debug, Clone)]
pub struct PolicySpec {
    pub name: String,
    pub state: PolicyState,
    pub statements: Option<Vec<serde_json::Value>>,
    pub users: Vec<String>,
    pub groups: Vec<String>,
}

/// Desired shape of one user.
#[derive(Debug, Clone)]
pub struct UserSpec {
    pub access_key: String,
    pub state: UserState,
    /// Required only when creating; existing users keep their secret.
    pub secret_key: Option<SecretString>,
}

/// Desired default retention rule for one bucket.
#[derive(Debug, Clone)]
pub struct RetentionSpec {
    pub bucket: String,
    pub state: RetentionState,
    pub mode: Option<RetentionMode>,
    pub days: Option<u32>,
}
