//! Shared helpers for command handlers.

use std::path::Path;

use crate::error::CliError;

/// Read IAM statements for `--statements-file`.
///
/// Accepts either a bare `Statement` array or a full policy document
/// containing one.
pub fn read_statements(path: &Path) -> Result<Vec<serde_json::Value>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| CliError::Validation {
            field: "statements-file".into(),
            reason: format!("invalid JSON: {e}"),
        })?;

    let statements = match &value {
        serde_json::Value::Array(items) => items.clone(),
        serde_json::Value::Object(doc) => match doc.get("Statement") {
            Some(serde_json::Value::Array(items)) => items.clone(),
            _ => {
                return Err(CliError::Validation {
                    field: "statements-file".into(),
                    reason: "expected a Statement array or a policy document with one".into(),
                });
            }
        },
        _ => {
            return Err(CliError::Validation {
                field: "statements-file".into(),
                reason: "expected a Statement array or a policy document with one".into(),
            });
        }
    };
    Ok(statements)
}
