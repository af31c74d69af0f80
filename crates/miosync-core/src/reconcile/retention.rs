// Bucket retention planning.
//
// The object-lock configuration cannot be read back on this surface,
// so there is no before document and no drift detection: a pass that
// writes always reports a change.

use serde_json::json;

use super::Pass;
use crate::canonical::{canonicalize, CanonicalRules, CanonicalValue};
use crate::diff::Diff;
use crate::model::{RetentionSpec, RetentionState};
use crate::plan::{MutationPlan, Operation};

pub(crate) fn plan(spec: &RetentionSpec) -> Pass {
    let rules = CanonicalRules::default();
    let mut plan = MutationPlan::default();

    let (after, message) = match spec.state {
        RetentionState::Present => match (spec.mode, spec.days) {
            (Some(mode), Some(days)) => {
                let lock_mode = miosync_api::LockMode::from(mode);
                plan.push(Operation::SetRetention {
                    bucket: spec.bucket.clone(),
                    mode,
                    days,
                });
                let desired = json!({
                    "Mode": lock_mode.as_str(),
                    "Duration": days,
                    "Unit": "DAYS",
                });
                (
                    Some(canonicalize(&desired, &rules)),
                    format!(
                        "retention set for bucket '{}' ({}, {days} days)",
                        spec.bucket,
                        lock_mode.as_str()
                    ),
                )
            }
            _ => (
                None,
                format!(
                    "bucket '{}': no retention mode and days given, nothing to do",
                    spec.bucket
                ),
            ),
        },
        RetentionState::Absent => {
            plan.push(Operation::ClearRetention {
                bucket: spec.bucket.clone(),
            });
            (
                Some(CanonicalValue::empty_map()),
                format!("retention cleared for bucket '{}'", spec.bucket),
            )
        }
    };

    Pass {
        diff: Diff::between(None, after),
        plan,
        message,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::RetentionMode;

    fn spec(
        state: RetentionState,
        mode: Option<RetentionMode>,
        days: Option<u32>,
    ) -> RetentionSpec {
        RetentionSpec {
            bucket: "archive".to_owned(),
            state,
            mode,
            days,
        }
    }

    #[test]
    fn present_with_mode_and_days_always_writes() {
        let pass = plan(&spec(
            RetentionState::Present,
            Some(RetentionMode::Governance),
            Some(30),
        ));
        let verbs: Vec<_> = pass.plan.iter().map(Operation::verb).collect();
        assert_eq!(verbs, ["set retention"]);
        assert!(pass.outcome().changed);
        assert_eq!(
            pass.message,
            "retention set for bucket 'archive' (GOVERNANCE, 30 days)"
        );
    }

    #[test]
    fn present_without_parameters_is_a_noop() {
        let pass = plan(&spec(RetentionState::Present, None, None));
        assert!(pass.plan.is_empty());
        assert!(!pass.outcome().changed);

        // Only one of the two parameters is still incomplete.
        let pass = plan(&spec(
            RetentionState::Present,
            Some(RetentionMode::Compliance),
            None,
        ));
        assert!(pass.plan.is_empty());
    }

    #[test]
    fn absent_clears_the_rule() {
        let pass = plan(&spec(RetentionState::Absent, None, None));
        let verbs: Vec<_> = pass.plan.iter().map(Operation::verb).collect();
        assert_eq!(verbs, ["clear retention"]);
        let outcome = pass.outcome();
        assert!(outcome.changed);
        assert_eq!(outcome.diff.before, "");
        assert_eq!(outcome.diff.after, "{}\n");
    }
}
