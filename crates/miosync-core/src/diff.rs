// Structural comparison of canonical documents.

use crate::canonical::CanonicalValue;

/// Before/after pair of canonical documents.
///
/// `None` on either side means the resource is (or will be) absent.
/// `changed` is pure structural inequality; it never depends on text
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff {
    pub changed: bool,
    pub before: Option<CanonicalValue>,
    pub after: Option<CanonicalValue>,
}

impl Diff {
    pub fn between(before: Option<CanonicalValue>, after: Option<CanonicalValue>) -> Self {
        let changed = before != after;
        Self {
            changed,
            before,
            after,
        }
    }

    /// An empty diff for resources that are absent on both sides.
    pub fn unchanged() -> Self {
        Self::between(None, None)
    }

    pub fn render_before(&self) -> String {
        self.before.as_ref().map(CanonicalValue::to_yaml).unwrap_or_default()
    }

    pub fn render_after(&self) -> String {
        self.after.as_ref().map(CanonicalValue::to_yaml).unwrap_or_default()
    }
}
