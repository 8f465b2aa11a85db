use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the provider's status token in every snapshot.
pub const STATUS_FIELD: &str = "status";

/// A remote job, identified by the opaque id its provider assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job {
    id: String,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read the job id from a provider's creation response.
    ///
    /// Accepts a non-empty string or a number under `id`.
    pub fn from_creation_response(response: &Value) -> Option<Self> {
        match response.get("id")? {
            Value::String(id) if !id.is_empty() => Some(Self::new(id.clone())),
            Value::Number(id) => Some(Self::new(id.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// One point-in-time status response for a job, kept as raw JSON fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    fields: Map<String, Value>,
}

impl StatusSnapshot {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The raw status token, if the provider sent one as a string.
    pub fn status(&self) -> Option<&str> {
        self.fields.get(STATUS_FIELD).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for StatusSnapshot {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
