// Canned-policy planning.
//
// The policy document is compared canonically, so Action/Resource
// order and key order never count as drift. Statement order does:
// IAM evaluation is order-free but the document is replaced wholesale,
// and reordering statements is treated as an intentional edit.
//
// Principal associations are write-only on the admin surface we use,
// so requested attachments (or detachments, when absent) are always
// planned.

use serde_json::json;

use super::Pass;
use crate::canonical::{canonicalize, CanonicalRules};
use crate::diff::Diff;
use crate::model::{PolicySpec, PolicyState};
use crate::plan::{MutationPlan, Operation, Principal};
use crate::state::ResourceState;

const POLICY_VERSION: &str = "2012-10-17";

fn rules() -> CanonicalRules {
    CanonicalRules::new(&[], &["Action", "Resource"])
}

pub(crate) fn plan(current: &ResourceState, spec: &PolicySpec) -> Pass {
    let rules = rules();
    let before = current.document().map(|doc| canonicalize(doc, &rules));

    match spec.state {
        PolicyState::Present => plan_present(spec, &rules, before),
        PolicyState::Absent => plan_absent(current, spec, before),
    }
}

fn plan_present(
    spec: &PolicySpec,
    rules: &CanonicalRules,
    before: Option<crate::canonical::CanonicalValue>,
) -> Pass {
    let document = json!({
        "Version": POLICY_VERSION,
        "Statement": spec.statements.clone().unwrap_or_default(),
    });
    let after = canonicalize(&document, rules);

    let mut plan = MutationPlan::default();
    let mut message = if before.as_ref() == Some(&after) {
        format!("policy '{}' is already up to date", spec.name)
    } else {
        // add-canned-policy is an upsert; create and update are the
        // same call.
        let verb = if before.is_some() { "updated" } else { "created" };
        plan.push(Operation::CreatePolicy {
            policy: spec.name.clone(),
            document,
        });
        format!("policy '{}' {verb}", spec.name)
    };

    let attached = push_associations(&mut plan, spec, true);
    if attached > 0 {
        message.push_str(&format!(", attached to {attached} principal(s)"));
    }

    Pass {
        diff: Diff::between(before, Some(after)),
        plan,
        message,
    }
}

fn plan_absent(
    current: &ResourceState,
    spec: &PolicySpec,
    before: Option<crate::canonical::CanonicalValue>,
) -> Pass {
    let mut plan = MutationPlan::default();

    // Detach before deleting so the server never sees a dangling
    // association.
    let detached = push_associations(&mut plan, spec, false);

    let mut message = if current.is_present() {
        plan.push(Operation::DeletePolicy {
            policy: spec.name.clone(),
        });
        format!("policy '{}' deleted", spec.name)
    } else {
        format!("policy '{}' does not exist", spec.name)
    };
    if detached > 0 {
        message.push_str(&format!(", detached from {detached} principal(s)"));
    }

    Pass {
        diff: Diff::between(before, None),
        plan,
        message,
    }
}

/// Queue attach (or detach) operations for every named principal.
fn push_associations(plan: &mut MutationPlan, spec: &PolicySpec, attach: bool) -> usize {
    let principals = spec
        .users
        .iter()
        .cloned()
        .map(Principal::User)
        .chain(spec.groups.iter().cloned().map(Principal::Group));

    let mut count = 0;
    for principal in principals {
        let op = if attach {
            Operation::AttachPolicy {
                policy: spec.name.clone(),
                principal,
            }
        } else {
            Operation::DetachPolicy {
                policy: spec.name.clone(),
                principal,
            }
        };
        plan.push(op);
        count += 1;
    }
    count
}
