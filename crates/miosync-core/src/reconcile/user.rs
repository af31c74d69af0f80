// User planning.
//
// For `present`, existence alone decides: an existing user is never
// touched, so a rotated secret key or a different status does not
// register as drift. Attached policies and group memberships are
// managed by their own reconcilers and stay out of the comparison.

use serde_json::json;

use super::Pass;
use crate::canonical::{canonicalize, CanonicalRules};
use crate::diff::Diff;
use crate::model::{UserSpec, UserState};
use crate::plan::{MutationPlan, Operation};
use crate::state::ResourceState;

fn rules() -> CanonicalRules {
    CanonicalRules::new(&["policyName", "memberOf", "updatedAt"], &[])
}

pub(crate) fn plan(current: &ResourceState, spec: &UserSpec) -> Pass {
    let rules = rules();
    let before = current.document().map(|doc| canonicalize(doc, &rules));

    let mut plan = MutationPlan::default();
    let (after, message) = match (spec.state, current.document()) {
        (UserState::Present, Some(_)) => (
            before.clone(),
            format!("user '{}' already exists", spec.access_key),
        ),
        (UserState::Present, None) => {
            // The caller validated that a secret key is present.
            if let Some(secret) = &spec.secret_key {
                plan.push(Operation::CreateUser {
                    access_key: spec.access_key.clone(),
                    secret_key: secret.clone(),
                });
            }
            let desired = json!({ "accessKey": spec.access_key, "status": "enabled" });
            (
                Some(canonicalize(&desired, &rules)),
                format!("user '{}' created", spec.access_key),
            )
        }
        (UserState::Disabled, Some(doc)) => {
            let after = canonicalize(&json!({ "status": "disabled" }), &rules);
            let message = if doc["status"] == "disabled" {
                format!("user '{}' is already disabled", spec.access_key)
            } else {
                plan.push(Operation::DisableUser {
                    access_key: spec.access_key.clone(),
                });
                format!("user '{}' disabled", spec.access_key)
            };
            (Some(after), message)
        }
        (UserState::Disabled, None) => {
            (None, format!("user '{}' does not exist", spec.access_key))
        }
        (UserState::Absent, Some(_)) => {
            plan.push(Operation::DeleteUser {
                access_key: spec.access_key.clone(),
            });
            (None, format!("user '{}' removed", spec.access_key))
        }
        (UserState::Absent, None) => {
            (None, format!("user '{}' does not exist", spec.access_key))
        }
    };

    Pass {
        diff: Diff::between(before, after),
        plan,
        message,
    }
}
