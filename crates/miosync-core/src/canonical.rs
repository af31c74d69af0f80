// Canonicalization of resource description documents.
//
// Current and desired state both pass through `canonicalize` before
// being compared or rendered, so that key order, volatile server
// fields, and order-free lists never register as drift. The rules are
// table-driven: each resource kind supplies the field names to drop
// and the list fields whose order carries no meaning.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A description document in comparable form.
///
/// Maps use `BTreeMap`, so key order is fixed; equality on this type is
/// the definition of "no drift".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Scalar(Value),
    List(Vec<CanonicalValue>),
    Map(BTreeMap<String, CanonicalValue>),
}

impl CanonicalValue {
    /// An empty map, the canonical form of "configured to nothing".
    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// Deterministic YAML rendering for diff display.
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_default()
    }

    /// Back to a plain JSON value, for re-canonicalization checks.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Per-resource canonicalization rules.
#[derive(Debug, Clone, Default)]
pub struct CanonicalRules {
    /// Field names excluded wherever they appear: server-managed or
    /// outside this reconciler's control.
    volatile: Vec<&'static str>,
    /// Field names (matched case-insensitively) whose list values are
    /// sets, not sequences. Scalar lists under these keys get sorted.
    order_insensitive: Vec<&'static str>,
}

impl CanonicalRules {
    pub fn new(volatile: &[&'static str], order_insensitive: &[&'static str]) -> Self {
        Self {
            volatile: volatile.to_vec(),
            order_insensitive: order_insensitive.to_vec(),
        }
    }

    fn is_volatile(&self, key: &str) -> bool {
        self.volatile.contains(&key)
    }

    fn is_order_insensitive(&self, key: &str) -> bool {
        self.order_insensitive
            .iter()
            .any(|k| k.eq_ignore_ascii_case(key))
    }
}

/// Reduce a raw description document to canonical form.
///
/// Null-valued and volatile fields are dropped, nested maps are sorted
/// by key, and scalar lists under order-insensitive keys are sorted.
pub fn canonicalize(value: &Value, rules: &CanonicalRules) -> CanonicalValue {
    walk(None, value, rules)
}

fn walk(key: Option<&str>, value: &Value, rules: &CanonicalRules) -> CanonicalValue {
    match value {
        Value::Object(fields) => {
            let mut map = BTreeMap::new();
            for (k, v) in fields {
                if v.is_null() || rules.is_volatile(k) {
                    continue;
                }
                map.insert(k.clone(), walk(Some(k), v, rules));
            }
            CanonicalValue::Map(map)
        }
        Value::Array(items) => {
            let mut list: Vec<CanonicalValue> =
                items.iter().map(|v| walk(None, v, rules)).collect();
            if key.is_some_and(|k| rules.is_order_insensitive(k)) {
                sort_scalars(&mut list);
            }
            CanonicalValue::List(list)
        }
        scalar => CanonicalValue::Scalar(scalar.clone()),
    }
}

/// Sort a list in place when every element is a scalar. Lists of maps
/// (e.g. policy statements) keep their order.
fn sort_scalars(list: &mut [CanonicalValue]) {
    if list
        .iter()
        .all(|v| matches!(v, CanonicalValue::Scalar(_)))
    {
        list.sort_by_cached_key(|v| match v {
            CanonicalValue::Scalar(s) => s.to_string(),
            _ => String::new(),
        });
    }
}
