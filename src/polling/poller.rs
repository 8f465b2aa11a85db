use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::snapshot::{Job, StatusSnapshot};
use crate::error::PollError;
use crate::providers::TransportError;

/// Fetch capability of a provider client: one status query for one job.
pub trait StatusFetcher {
    fn fetch_status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<StatusSnapshot, TransportError>> + Send;
}

/// Issues single status queries for one job.
pub struct StatusPoller<'a, F> {
    fetcher: &'a F,
    job: &'a Job,
}

impl<'a, F: StatusFetcher> StatusPoller<'a, F> {
    pub fn new(fetcher: &'a F, job: &'a Job) -> Self {
        Self { fetcher, job }
    }

    /// Fetch one snapshot, giving up early if `cancel` fires.
    ///
    /// `attempt` is only used to report how far a cancelled session got.
    pub async fn poll_once(
        &self,
        attempt: u32,
        cancel: &CancellationToken,
    ) -> Result<StatusSnapshot, PollError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PollError::Cancelled {
                job_id: self.job.id().to_string(),
                attempts: attempt,
            }),
            result = self.fetcher.fetch_status(self.job.id()) => {
                result.map_err(|source| PollError::Transport {
                    job_id: self.job.id().to_string(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedFetcher {
        ok: bool,
    }

    impl StatusFetcher for FixedFetcher {
        async fn fetch_status(&self, job_id: &str) -> Result<StatusSnapshot, TransportError> {
            if self.ok {
                Ok(StatusSnapshot::from_value(json!({"id": job_id, "status": "RUNNING"})).unwrap())
            } else {
                Err(TransportError::Api {
                    status: 502,
                    message: "bad gateway".into(),
                })
            }
        }
    }

    #[tokio::test]
    async fn returns_raw_snapshot() {
        let job = Job::new("task_7");
        let fetcher = FixedFetcher { ok: true };
        let poller = StatusPoller::new(&fetcher, &job);

        let snapshot = poller.poll_once(1, &CancellationToken::new()).await.unwrap();
        assert_eq!(snapshot.status(), Some("RUNNING"));
        assert_eq!(snapshot.get("id"), Some(&json!("task_7")));
    }

    #[tokio::test]
    async fn propagates_fetch_error() {
        let job = Job::new("task_7");
        let fetcher = FixedFetcher { ok: false };
        let poller = StatusPoller::new(&fetcher, &job);

        let err = poller.poll_once(1, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(
            err,
            PollError::Transport {
                source: TransportError::Api { status: 502, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let job = Job::new("task_7");
        let fetcher = FixedFetcher { ok: true };
        let poller = StatusPoller::new(&fetcher, &job);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = poller.poll_once(4, &cancel).await.unwrap_err();
        assert!(matches!(err, PollError::Cancelled { attempts: 4, .. }));
    }
}
