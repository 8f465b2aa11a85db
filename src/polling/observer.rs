use std::time::Duration;

use super::outcome::{Outcome, Status};
use crate::error::PollError;

/// A state transition inside a polling session.
#[derive(Debug, Clone, Copy)]
pub enum PollEvent<'a> {
    AttemptStarted {
        job_id: &'a str,
        attempt: u32,
        max_attempts: u32,
    },
    Classified {
        job_id: &'a str,
        attempt: u32,
        token: Option<&'a str>,
        status: Status,
    },
    /// An attempt raised an error. `will_retry` is false on the terminal one.
    AttemptFailed {
        job_id: &'a str,
        attempt: u32,
        error: &'a PollError,
        will_retry: bool,
    },
    Sleeping {
        job_id: &'a str,
        attempt: u32,
        delay: Duration,
    },
    Finished {
        job_id: &'a str,
        outcome: &'a Outcome,
    },
    /// The session ended with an error, cancellation included.
    Aborted {
        job_id: &'a str,
        attempts: u32,
        error: &'a PollError,
    },
}

/// Receives every [`PollEvent`] of the sessions it is attached to.
pub trait PollObserver: Send + Sync {
    fn on_event(&self, event: &PollEvent<'_>);
}

/// Ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PollObserver for NoopObserver {
    fn on_event(&self, _event: &PollEvent<'_>) {}
}

/// Emits events as `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PollObserver for TracingObserver {
    fn on_event(&self, event: &PollEvent<'_>) {
        match *event {
            PollEvent::AttemptStarted {
                job_id,
                attempt,
                max_attempts,
            } => {
                tracing::debug!(job_id, attempt, max_attempts, "polling job status");
            }
            PollEvent::Classified {
                job_id,
                attempt,
                token,
                status,
            } => {
                tracing::info!(
                    job_id,
                    attempt,
                    token = token.unwrap_or("<missing>"),
                    %status,
                    "job status classified",
                );
            }
            PollEvent::AttemptFailed {
                job_id,
                attempt,
                error,
                will_retry,
            } => {
                if will_retry {
                    tracing::warn!(job_id, attempt, error = %error, "polling attempt failed, retrying");
                } else {
                    tracing::error!(job_id, attempt, error = %error, "polling attempt failed");
                }
            }
            PollEvent::Sleeping {
                job_id,
                attempt,
                delay,
            } => {
                tracing::debug!(
                    job_id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "waiting before next attempt",
                );
            }
            PollEvent::Finished { job_id, outcome } => {
                tracing::info!(job_id, %outcome, "polling finished");
            }
            PollEvent::Aborted {
                job_id,
                attempts,
                error,
            } => {
                tracing::warn!(job_id, attempts, class = ?error.class(), error = %error, "polling aborted");
            }
        }
    }
}
