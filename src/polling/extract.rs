//! Result and error-message extraction from loosely shaped snapshots.
//!
//! Each provider picks one [`ResultLocation`] and one [`ErrorLocation`] when
//! its adapter is built; nothing here inspects a snapshot to guess its shape.

use serde_json::Value;

use super::snapshot::StatusSnapshot;
use crate::error::ExtractionError;

/// Where a succeeded snapshot keeps its result URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLocation {
    /// The URL lives on a result object inside a container field.
    ///
    /// The plural container must hold a non-empty array; the singular one may
    /// hold a single object or a non-empty array. The first element wins.
    Containers {
        plural: &'static str,
        singular: &'static str,
        url_field: &'static str,
        url_fallback: &'static str,
    },
    /// The URL is a top-level field of the snapshot.
    TopLevel { field: &'static str },
}

impl ResultLocation {
    pub fn extract(&self, snapshot: &StatusSnapshot) -> Result<String, ExtractionError> {
        match *self {
            ResultLocation::TopLevel { field } => non_empty_str(snapshot.get(field))
                .map(str::to_owned)
                .ok_or(ExtractionError::MissingResultField),
            ResultLocation::Containers {
                plural,
                singular,
                url_field,
                url_fallback,
            } => {
                let result = result_object(snapshot, plural, singular)?;
                non_empty_str(result.get(url_field))
                    .or_else(|| non_empty_str(result.get(url_fallback)))
                    .map(str::to_owned)
                    .ok_or(ExtractionError::NoResultField)
            }
        }
    }
}

fn result_object<'a>(
    snapshot: &'a StatusSnapshot,
    plural: &str,
    singular: &str,
) -> Result<&'a Value, ExtractionError> {
    if let Some(Value::Array(items)) = snapshot.get(plural)
        && let Some(first) = items.first()
    {
        return Ok(first);
    }

    match snapshot.get(singular) {
        Some(Value::Array(items)) => items.first().ok_or(ExtractionError::NoResultContainer),
        Some(value) if is_truthy(value) => Ok(value),
        _ => Err(ExtractionError::NoResultContainer),
    }
}

/// Where a failed snapshot keeps its human-readable reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Field checked first.
    pub primary: &'static str,
    /// Field checked when the primary one is absent or empty.
    pub secondary: Option<&'static str>,
    /// Sub-field read when the error detail is an object.
    pub description_field: &'static str,
    pub default_message: &'static str,
}

impl ErrorLocation {
    /// Build the failure reason. Never fails: falls back to the default message.
    pub fn message(&self, snapshot: &StatusSnapshot) -> String {
        let details = truthy(snapshot.get(self.primary))
            .or_else(|| self.secondary.and_then(|key| truthy(snapshot.get(key))));

        match details {
            // A present description wins even when empty or not a string.
            Some(Value::Object(fields)) => match fields.get(self.description_field) {
                Some(Value::String(description)) => description.clone(),
                Some(description) => description.to_string(),
                None => Value::Object(fields.clone()).to_string(),
            },
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => self.default_message.to_string(),
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

// null, false, 0, "", [] and {} carry no information.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
