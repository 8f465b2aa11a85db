use thiserror::Error;

use crate::providers::{SubmitError, TransportError};

/// Why a successful snapshot did not yield a result URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Neither the plural nor the singular container held a result object.
    #[error("no result container")]
    NoResultContainer,

    /// The result object had neither the primary nor the fallback URL field.
    #[error("no result field")]
    NoResultField,

    /// The top-level result field was absent or empty.
    #[error("missing result field")]
    MissingResultField,
}

/// Errors raised while polling a single job.
///
/// Every variant except [`PollError::Cancelled`] can be raised by an attempt
/// and handed to the retry policy; the one surfaced to the caller is the
/// error of the last attempt.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("status query for job {job_id} failed: {source}")]
    Transport {
        job_id: String,
        #[source]
        source: TransportError,
    },

    #[error("job {job_id} failed (status: {status}): {reason}")]
    JobFailed {
        job_id: String,
        status: String,
        reason: String,
    },

    #[error("job {job_id} returned an unknown status: {status}")]
    UnknownStatus { job_id: String, status: String },

    #[error("could not extract result for job {job_id}: {source}")]
    Extraction {
        job_id: String,
        #[source]
        source: ExtractionError,
    },

    #[error("polling for job {job_id} cancelled after {attempts} attempt(s)")]
    Cancelled { job_id: String, attempts: u32 },
}

/// Coarse class of a [`PollError`], used by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Network or HTTP failure while fetching a snapshot.
    Transport,
    /// The provider reported a terminal failure token.
    JobFailed,
    /// The provider reported a token outside its vocabulary.
    UnknownStatus,
    /// A succeeded snapshot had no recoverable result.
    Extraction,
    Cancelled,
}

impl PollError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PollError::Transport { .. } => ErrorClass::Transport,
            PollError::JobFailed { .. } => ErrorClass::JobFailed,
            PollError::UnknownStatus { .. } => ErrorClass::UnknownStatus,
            PollError::Extraction { .. } => ErrorClass::Extraction,
            PollError::Cancelled { .. } => ErrorClass::Cancelled,
        }
    }

    /// Identifier of the job whose session raised this error.
    pub fn job_id(&self) -> &str {
        match self {
            PollError::Transport { job_id, .. }
            | PollError::JobFailed { job_id, .. }
            | PollError::UnknownStatus { job_id, .. }
            | PollError::Extraction { job_id, .. }
            | PollError::Cancelled { job_id, .. } => job_id,
        }
    }
}

/// Errors from the multi-step generation workflows.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error("intermediate job {job_id} did not finish after {attempts} attempts")]
    StepTimedOut { job_id: String, attempts: u32 },
}

/// Configuration problems detected while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("max attempts must be at least 1")]
    ZeroAttempts,

    #[error("{provider} API key not set (use {env_var} or the config file)")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
