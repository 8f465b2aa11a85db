use std::fmt;

use serde::{Deserialize, Serialize};

use super::classifier::{DID_VOCABULARY, ProviderVocabulary, RUNWAY_VOCABULARY, classify};
use super::extract::{ErrorLocation, ResultLocation};
use super::outcome::Status;
use super::snapshot::StatusSnapshot;
use crate::error::ExtractionError;

/// Remote generation services known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Runway,
    Did,
}

impl Provider {
    pub fn adapter(self) -> ProviderAdapter {
        match self {
            Provider::Runway => ProviderAdapter::RUNWAY,
            Provider::Did => ProviderAdapter::DID,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Runway => write!(f, "runway"),
            Provider::Did => write!(f, "d-id"),
        }
    }
}

/// Binds one provider's vocabulary and extraction strategy.
///
/// Adapters are plain immutable values; one can be shared by any number of
/// concurrent polling sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderAdapter {
    pub name: &'static str,
    pub vocabulary: ProviderVocabulary,
    pub result: ResultLocation,
    pub error: ErrorLocation,
}

impl ProviderAdapter {
    /// Runway tasks: `outputs`/`output` containers, `error_message` on failure.
    pub const RUNWAY: ProviderAdapter = ProviderAdapter {
        name: "runway",
        vocabulary: RUNWAY_VOCABULARY,
        result: ResultLocation::Containers {
            plural: "outputs",
            singular: "output",
            url_field: "url",
            url_fallback: "uri",
        },
        error: ErrorLocation {
            primary: "error_message",
            secondary: None,
            description_field: "description",
            default_message: "Task failed without a specific error message.",
        },
    };

    /// D-ID talks: top-level `result_url`; rejections may put detail in `result`.
    pub const DID: ProviderAdapter = ProviderAdapter {
        name: "d-id",
        vocabulary: DID_VOCABULARY,
        result: ResultLocation::TopLevel {
            field: "result_url",
        },
        error: ErrorLocation {
            primary: "error",
            secondary: Some("result"),
            description_field: "description",
            default_message: "Task failed or was rejected without a specific error message.",
        },
    };

    pub fn classify(&self, snapshot: &StatusSnapshot) -> Status {
        classify(snapshot.status(), &self.vocabulary)
    }

    pub fn extract_result(&self, snapshot: &StatusSnapshot) -> Result<String, ExtractionError> {
        self.result.extract(snapshot)
    }

    pub fn failure_reason(&self, snapshot: &StatusSnapshot) -> String {
        self.error.message(snapshot)
    }
}
