use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform classification of a provider's raw status token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Succeeded,
    Failed,
    InProgress,
    /// The token is not in any of the provider's token sets.
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Succeeded => write!(f, "SUCCEEDED"),
            Status::Failed => write!(f, "FAILED"),
            Status::InProgress => write!(f, "IN_PROGRESS"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Terminal result of one polling session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success { result_url: String },
    Failure { reason: String },
    /// Every attempt reported an in-progress status.
    TimedOut { attempts: u32 },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn result_url(&self) -> Option<&str> {
        match self {
            Outcome::Success { result_url } => Some(result_url),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { result_url } => write!(f, "succeeded: {result_url}"),
            Outcome::Failure { reason } => write!(f, "failed: {reason}"),
            Outcome::TimedOut { attempts } => write!(f, "timed out after {attempts} attempts"),
        }
    }
}

/// Record of a finished polling session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollReport {
    pub job_id: String,
    pub provider: String,
    pub outcome: Outcome,
    /// Number of status queries issued.
    pub attempts: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PollReport {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
