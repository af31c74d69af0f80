// The user-facing result of one reconciliation pass.

use serde::Serialize;

use crate::diff::Diff;

/// Rendered before/after documents, deterministic YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffText {
    pub before: String,
    pub after: String,
}

/// What a reconciliation pass did (or, in preview mode, would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Whether any mutation was (or would be) applied.
    pub changed: bool,
    /// Human-readable summary of the pass.
    pub message: String,
    /// Before/after state rendering.
    pub diff: DiffText,
}

impl Outcome {
    pub fn new(changed: bool, message: impl Into<String>, diff: &Diff) -> Self {
        Self {
            changed,
            message: message.into(),
            diff: DiffText {
                before: diff.render_before(),
                after: diff.render_after(),
            },
        }
    }
}
