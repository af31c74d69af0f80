// Group planning.
//
// Membership is reconciled with minimal set differences, and a
// disabled group is re-enabled before its membership changes so that
// the member updates land on an active group.

use std::collections::BTreeSet;

use serde_json::Value;

use super::Pass;
use crate::canonical::{canonicalize, CanonicalRules};
use crate::diff::Diff;
use crate::model::{GroupSpec, GroupState};
use crate::plan::{MutationPlan, Operation};
use crate::state::ResourceState;

/// The attached policy is managed by the policy reconciler, and
/// `updatedAt` is server-maintained.
fn rules(manage_members: bool) -> CanonicalRules {
    if manage_members {
        CanonicalRules::new(&["policy", "updatedAt"], &["members"])
    } else {
        // Membership left alone: keep it out of the comparison too.
        CanonicalRules::new(&["policy", "updatedAt", "members"], &[])
    }
}

pub(crate) fn plan(current: &ResourceState, spec: &GroupSpec) -> Pass {
    let manage_members = spec.state == GroupState::Present && spec.users.is_some();
    let rules = rules(manage_members);
    let before = current.document().map(|doc| canonicalize(doc, &rules));

    match spec.state {
        GroupState::Present => plan_present(current, spec, &rules, before),
        GroupState::Disabled => plan_disabled(current, spec, &rules, before),
        GroupState::Absent => plan_absent(current, spec, before),
    }
}

fn plan_present(
    current: &ResourceState,
    spec: &GroupSpec,
    rules: &CanonicalRules,
    before: Option<crate::canonical::CanonicalValue>,
) -> Pass {
    let mut desired = serde_json::Map::new();
    desired.insert("name".to_owned(), spec.name.clone().into());
    desired.insert("status".to_owned(), "enabled".into());
    if let Some(users) = &spec.users {
        desired.insert("members".to_owned(), users.clone().into());
    }
    let after = canonicalize(&Value::Object(desired), rules);

    let mut plan = MutationPlan::default();
    let message = match current.document() {
        None => {
            plan.push(Operation::CreateGroup {
                group: spec.name.clone(),
                members: spec.users.clone().unwrap_or_default(),
            });
            format!("group '{}' created", spec.name)
        }
        Some(doc) => {
            let mut notes = Vec::new();
            if doc["status"] == "disabled" {
                plan.push(Operation::EnableGroup {
                    group: spec.name.clone(),
                });
                notes.push("enabled");
            }
            if let Some(users) = &spec.users {
                let have = member_set(doc);
                let want: BTreeSet<String> = users.iter().cloned().collect();
                let to_add: BTreeSet<String> = want.difference(&have).cloned().collect();
                let to_remove: BTreeSet<String> = have.difference(&want).cloned().collect();
                if !to_add.is_empty() {
                    plan.push(Operation::AddMembers {
                        group: spec.name.clone(),
                        members: to_add,
                    });
                    notes.push("members added");
                }
                if !to_remove.is_empty() {
                    plan.push(Operation::RemoveMembers {
                        group: spec.name.clone(),
                        members: to_remove,
                    });
                    notes.push("members removed");
                }
            }
            if notes.is_empty() {
                format!("group '{}' is already up to date", spec.name)
            } else {
                format!("group '{}': {}", spec.name, notes.join(", "))
            }
        }
    };

    Pass {
        diff: Diff::between(before, Some(after)),
        plan,
        message,
    }
}

fn plan_disabled(
    current: &ResourceState,
    spec: &GroupSpec,
    rules: &CanonicalRules,
    before: Option<crate::canonical::CanonicalValue>,
) -> Pass {
    let mut plan = MutationPlan::default();
    let (after, message) = match current.document() {
        None => (None, format!("group '{}' does not exist", spec.name)),
        Some(doc) => {
            let desired = serde_json::json!({ "name": spec.name, "status": "disabled" });
            let after = canonicalize(&desired, rules);
            let message = if doc["status"] == "disabled" {
                format!("group '{}' is already disabled", spec.name)
            } else {
                plan.push(Operation::DisableGroup {
                    group: spec.name.clone(),
                });
                format!("group '{}' disabled", spec.name)
            };
            (Some(after), message)
        }
    };

    Pass {
        diff: Diff::between(before, after),
        plan,
        message,
    }
}

fn plan_absent(
    current: &ResourceState,
    spec: &GroupSpec,
    before: Option<crate::canonical::CanonicalValue>,
) -> Pass {
    let mut plan = MutationPlan::default();
    let message = if current.is_present() {
        plan.push(Operation::DeleteGroup {
            group: spec.name.clone(),
        });
        format!("group '{}' removed", spec.name)
    } else {
        format!("group '{}' does not exist", spec.name)
    };

    Pass {
        diff: Diff::between(before, None),
        plan,
        message,
    }
}

fn member_set(doc: &Value) -> BTreeSet<String> {
    doc["members"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
