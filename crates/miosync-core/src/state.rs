// Fetched server-side state for a single resource.

use serde_json::Value;

/// What the server currently holds for one resource.
///
/// A "no such resource" admin error during fetch becomes `Absent`;
/// every other fetch failure is an error, never `Absent`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState {
    Absent,
    Present(Value),
}

impl ResourceState {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The raw description document, when the resource exists.
    pub fn document(&self) -> Option<&Value> {
        match self {
            Self::Present(doc) => Some(doc),
            Self::Absent => None,
        }
    }
}
