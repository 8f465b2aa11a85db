use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::adapter::ProviderAdapter;
use super::observer::{PollEvent, PollObserver, TracingObserver};
use super::outcome::{Outcome, PollReport, Status};
use super::poller::{StatusFetcher, StatusPoller};
use super::snapshot::{Job, StatusSnapshot};
use crate::error::{ConfigError, ErrorClass, PollError};

const MISSING_TOKEN: &str = "<missing>";

/// Interval and attempt bound for one polling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    poll_interval: Duration,
    max_attempts: u32,
}

impl PollSettings {
    /// Runway task defaults: every 5 s, 60 attempts.
    pub const RUNWAY: PollSettings = PollSettings::fixed(5, 60);

    /// D-ID talk defaults: every 3 s, 40 attempts.
    pub const DID: PollSettings = PollSettings::fixed(3, 40);

    /// Intermediate image of a text-to-video run: every 5 s, 24 attempts.
    pub const IMAGE_STEP: PollSettings = PollSettings::fixed(5, 24);

    const fn fixed(poll_interval_secs: u64, max_attempts: u32) -> Self {
        Self {
            poll_interval: Duration::from_secs(poll_interval_secs),
            max_attempts,
        }
    }

    pub fn new(poll_interval: Duration, max_attempts: u32) -> Result<Self, ConfigError> {
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(Self {
            poll_interval,
            max_attempts,
        })
    }

    pub fn from_secs(poll_interval_secs: u64, max_attempts: u32) -> Result<Self, ConfigError> {
        Self::new(Duration::from_secs(poll_interval_secs), max_attempts)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::RUNWAY
    }
}

/// Whether a failed attempt is followed by another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    GiveUp,
}

/// Decides which attempt errors are retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Retry every error class identically, definitive job failures included.
    #[default]
    Uniform,
    /// Surface the first error.
    FailFast,
}

impl RetryPolicy {
    pub fn decide(self, error: &PollError, attempt: u32, max_attempts: u32) -> RetryDecision {
        if attempt >= max_attempts {
            return RetryDecision::GiveUp;
        }
        match (self, error.class()) {
            (_, ErrorClass::Cancelled) => RetryDecision::GiveUp,
            (RetryPolicy::FailFast, _) => RetryDecision::GiveUp,
            (RetryPolicy::Uniform, _) => RetryDecision::Retry,
        }
    }
}

/// Result of one attempt that did not raise.
enum Step {
    Finished(String),
    Pending,
}

/// Drives a job from `Created` through `Polling` to a terminal outcome.
///
/// The engine is provider-agnostic: the adapter supplies the vocabulary and
/// extraction strategy, the fetcher supplies the snapshots. It holds no
/// per-session state, so one engine can run many sessions concurrently.
#[derive(Clone)]
pub struct PollingEngine {
    settings: PollSettings,
    policy: RetryPolicy,
    observer: Arc<dyn PollObserver>,
}

impl PollingEngine {
    pub fn new(settings: PollSettings) -> Self {
        Self {
            settings,
            policy: RetryPolicy::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PollObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Poll `job` until it succeeds, every attempt is used up, or `cancel` fires.
    ///
    /// - `Ok(Outcome::Success)` as soon as a snapshot is classified succeeded
    ///   and its result URL is extracted.
    /// - `Ok(Outcome::TimedOut)` when the attempts ran out without any error.
    /// - `Err` with the error of the last attempt when the retry policy gives up.
    pub async fn poll_until_terminal<F: StatusFetcher>(
        &self,
        job: &Job,
        adapter: &ProviderAdapter,
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> Result<Outcome, PollError> {
        self.run_instrumented(job, adapter, fetcher, cancel).await.0
    }

    /// Like [`poll_until_terminal`](Self::poll_until_terminal), but folds a
    /// terminal error into [`Outcome::Failure`] and records timing.
    pub async fn settle<F: StatusFetcher>(
        &self,
        job: &Job,
        adapter: &ProviderAdapter,
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> PollReport {
        let started_at = Utc::now();
        let (result, attempts) = self.run_instrumented(job, adapter, fetcher, cancel).await;
        let outcome = result.unwrap_or_else(|err| Outcome::Failure {
            reason: err.to_string(),
        });

        PollReport {
            job_id: job.id().to_string(),
            provider: adapter.name.to_string(),
            outcome,
            attempts,
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn run_instrumented<F: StatusFetcher>(
        &self,
        job: &Job,
        adapter: &ProviderAdapter,
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> (Result<Outcome, PollError>, u32) {
        let span = tracing::info_span!(
            "poll_session",
            session_id = %Uuid::new_v4(),
            job_id = job.id(),
            provider = adapter.name,
        );
        self.run_session(job, adapter, fetcher, cancel)
            .instrument(span)
            .await
    }

    // Returns the terminal result and the number of attempts made.
    async fn run_session<F: StatusFetcher>(
        &self,
        job: &Job,
        adapter: &ProviderAdapter,
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> (Result<Outcome, PollError>, u32) {
        let poller = StatusPoller::new(fetcher, job);
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            self.observer.on_event(&PollEvent::AttemptStarted {
                job_id: job.id(),
                attempt,
                max_attempts,
            });

            match self.attempt(&poller, job, adapter, attempt, cancel).await {
                Ok(Step::Finished(result_url)) => {
                    let outcome = Outcome::Success { result_url };
                    self.finish(job, &outcome);
                    return (Ok(outcome), attempt);
                }
                Ok(Step::Pending) => {}
                Err(err) => {
                    let decision = self.policy.decide(&err, attempt, max_attempts);
                    self.observer.on_event(&PollEvent::AttemptFailed {
                        job_id: job.id(),
                        attempt,
                        error: &err,
                        will_retry: decision == RetryDecision::Retry,
                    });
                    if decision == RetryDecision::GiveUp {
                        self.abort(job, attempt, &err);
                        return (Err(err), attempt);
                    }
                }
            }

            if let Err(err) = self.pause(job, attempt, cancel).await {
                self.abort(job, attempt, &err);
                return (Err(err), attempt);
            }
        }

        let outcome = Outcome::TimedOut {
            attempts: max_attempts,
        };
        self.finish(job, &outcome);
        (Ok(outcome), max_attempts)
    }

    async fn attempt<F: StatusFetcher>(
        &self,
        poller: &StatusPoller<'_, F>,
        job: &Job,
        adapter: &ProviderAdapter,
        attempt: u32,
        cancel: &CancellationToken,
    ) -> Result<Step, PollError> {
        let snapshot = poller.poll_once(attempt, cancel).await?;
        let status = adapter.classify(&snapshot);
        self.observer.on_event(&PollEvent::Classified {
            job_id: job.id(),
            attempt,
            token: snapshot.status(),
            status,
        });

        match status {
            Status::Succeeded => adapter
                .extract_result(&snapshot)
                .map(Step::Finished)
                .map_err(|source| PollError::Extraction {
                    job_id: job.id().to_string(),
                    source,
                }),
            Status::Failed => Err(PollError::JobFailed {
                job_id: job.id().to_string(),
                status: token_of(&snapshot),
                reason: adapter.failure_reason(&snapshot),
            }),
            Status::InProgress => Ok(Step::Pending),
            Status::Unknown => Err(PollError::UnknownStatus {
                job_id: job.id().to_string(),
                status: token_of(&snapshot),
            }),
        }
    }

    async fn pause(
        &self,
        job: &Job,
        attempt: u32,
        cancel: &CancellationToken,
    ) -> Result<(), PollError> {
        let delay = self.settings.poll_interval;
        self.observer.on_event(&PollEvent::Sleeping {
            job_id: job.id(),
            attempt,
            delay,
        });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PollError::Cancelled {
                job_id: job.id().to_string(),
                attempts: attempt,
            }),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn finish(&self, job: &Job, outcome: &Outcome) {
        self.observer.on_event(&PollEvent::Finished {
            job_id: job.id(),
            outcome,
        });
    }

    fn abort(&self, job: &Job, attempts: u32, error: &PollError) {
        self.observer.on_event(&PollEvent::Aborted {
            job_id: job.id(),
            attempts,
            error,
        });
    }
}

fn token_of(snapshot: &StatusSnapshot) -> String {
    snapshot.status().unwrap_or(MISSING_TOKEN).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::TransportError;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Clone)]
    enum Reply {
        Status(Value),
        HttpError(u16),
    }

    /// Replays a fixed script of replies; the last one repeats forever.
    struct ScriptedFetcher {
        replies: Vec<Reply>,
        calls: AtomicU32,
    }

    impl ScriptedFetcher {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StatusFetcher for ScriptedFetcher {
        async fn fetch_status(&self, _job_id: &str) -> Result<StatusSnapshot, TransportError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            match &self.replies[index.min(self.replies.len() - 1)] {
                Reply::Status(value) => Ok(StatusSnapshot::from_value(value.clone()).unwrap()),
                Reply::HttpError(status) => Err(TransportError::Api {
                    status: *status,
                    message: "scripted failure".into(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        sleeps: AtomicU32,
        failures: Mutex<Vec<(u32, bool)>>,
        finished: Mutex<Vec<Outcome>>,
        events: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }

        fn sleeps(&self) -> u32 {
            self.sleeps.load(Ordering::SeqCst)
        }

        fn failures(&self) -> Vec<(u32, bool)> {
            self.failures.lock().unwrap().clone()
        }
    }

    impl PollObserver for Recorder {
        fn on_event(&self, event: &PollEvent<'_>) {
            let name = match event {
                PollEvent::AttemptStarted { .. } => "started",
                PollEvent::Classified { .. } => "classified",
                PollEvent::AttemptFailed { .. } => "failed",
                PollEvent::Sleeping { .. } => "sleeping",
                PollEvent::Finished { .. } => "finished",
                PollEvent::Aborted { .. } => "aborted",
            };
            self.events.lock().unwrap().push(name);

            match *event {
                PollEvent::Sleeping { .. } => {
                    self.sleeps.fetch_add(1, Ordering::SeqCst);
                }
                PollEvent::AttemptFailed {
                    attempt,
                    will_retry,
                    ..
                } => self.failures.lock().unwrap().push((attempt, will_retry)),
                PollEvent::Finished { outcome, .. } => {
                    self.finished.lock().unwrap().push(outcome.clone())
                }
                _ => {}
            }
        }
    }

    fn runway(status: &str) -> Reply {
        Reply::Status(json!({"id": "task_1", "status": status}))
    }

    fn runway_done(url: &str) -> Reply {
        Reply::Status(json!({"id": "task_1", "status": "SUCCEEDED", "outputs": [{"url": url}]}))
    }

    fn engine(max_attempts: u32, recorder: &Arc<Recorder>) -> PollingEngine {
        PollingEngine::new(PollSettings::from_secs(5, max_attempts).unwrap())
            .with_observer(recorder.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_in_progress_attempts() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![
            runway("PENDING"),
            runway("RUNNING"),
            runway_done("https://cdn/v.mp4"),
        ]);
        let start = Instant::now();

        let outcome = engine(3, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Success {
                result_url: "https://cdn/v.mp4".into()
            }
        );
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(recorder.sleeps(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
        assert_eq!(recorder.finished.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn all_in_progress_times_out() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![runway("RUNNING")]);

        let outcome = engine(3, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::TimedOut { attempts: 3 });
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(recorder.sleeps(), 3);
        assert!(recorder.failures().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_on_last_attempt_is_raised() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![
            Reply::Status(json!({"status": "started"})),
            Reply::Status(json!({"status": "error", "error": {"description": "boom"}})),
        ]);

        let err = engine(2, &recorder)
            .poll_until_terminal(
                &Job::new("talk_1"),
                &ProviderAdapter::DID,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::JobFailed { ref reason, .. } if reason == "boom"));
        assert!(err.to_string().contains("boom"));
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(recorder.failures(), vec![(2, false)]);
        assert_eq!(
            recorder.events(),
            vec![
                "started",
                "classified",
                "sleeping",
                "started",
                "classified",
                "failed",
                "aborted",
            ]
        );
        assert!(recorder.finished.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_raised_only_after_final_attempt() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![Reply::HttpError(503)]);

        let err = engine(3, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PollError::Transport {
                source: TransportError::Api { status: 503, .. },
                ..
            }
        ));
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(recorder.failures(), vec![(1, true), (2, true), (3, false)]);
        assert_eq!(recorder.sleeps(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn definitive_failure_is_retried_like_transport_errors() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![
            Reply::Status(json!({"status": "FAILED", "error_message": "flaky"})),
            runway_done("https://cdn/after-retry.mp4"),
        ]);

        let outcome = engine(3, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.result_url(), Some("https://cdn/after-retry.mp4"));
        assert_eq!(recorder.failures(), vec![(1, true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_status_surfaces_token() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![runway("THROTTLED")]);

        let err = engine(2, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(
            matches!(err, PollError::UnknownStatus { ref status, .. } if status == "THROTTLED")
        );
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_status_is_unknown() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![Reply::Status(json!({"id": "task_1"}))]);

        let err = engine(1, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "job task_1 returned an unknown status: <missing>"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn extraction_error_is_retried() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![
            runway("SUCCEEDED"),
            runway_done("https://cdn/late.mp4"),
        ]);

        let outcome = engine(3, &recorder)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.result_url(), Some("https://cdn/late.mp4"));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fail_fast_surfaces_first_error() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![Reply::Status(
            json!({"status": "FAILED", "error_message": "bad prompt"}),
        )]);

        let err = engine(5, &recorder)
            .with_policy(RetryPolicy::FailFast)
            .poll_until_terminal(
                &Job::new("task_1"),
                &ProviderAdapter::RUNWAY,
                &fetcher,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::JobFailed);
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(recorder.sleeps(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_sleep() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![runway("RUNNING")]);
        let cancel = CancellationToken::new();
        let engine = engine(10, &recorder);
        let job = Job::new("task_1");

        let (result, ()) = tokio::join!(
            engine.poll_until_terminal(&job, &ProviderAdapter::RUNWAY, &fetcher, &cancel),
            async {
                tokio::time::sleep(Duration::from_secs(7)).await;
                cancel.cancel();
            }
        );

        assert!(matches!(
            result,
            Err(PollError::Cancelled { attempts: 2, .. })
        ));
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(recorder.events().last(), Some(&"aborted"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_in_first_wait_reports_aborted() {
        let recorder = Arc::new(Recorder::default());
        let fetcher = ScriptedFetcher::new(vec![runway("RUNNING")]);
        let cancel = CancellationToken::new();
        let engine = engine(10, &recorder);
        let job = Job::new("task_1");

        let (result, ()) = tokio::join!(
            engine.poll_until_terminal(&job, &ProviderAdapter::RUNWAY, &fetcher, &cancel),
            async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                cancel.cancel();
            }
        );

        assert!(matches!(
            result,
            Err(PollError::Cancelled { attempts: 1, .. })
        ));
        assert_eq!(
            recorder.events(),
            vec!["started", "classified", "sleeping", "aborted"]
        );
        assert!(recorder.failures().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn independent_sessions_progress_concurrently() {
        let recorder = Arc::new(Recorder::default());
        let engine = engine(3, &recorder);
        let first = ScriptedFetcher::new(vec![runway("RUNNING"), runway_done("https://cdn/a")]);
        let second = ScriptedFetcher::new(vec![runway("RUNNING"), runway_done("https://cdn/b")]);
        let cancel = CancellationToken::new();
        let (job_a, job_b) = (Job::new("a"), Job::new("b"));
        let start = Instant::now();

        let (a, b) = tokio::join!(
            engine.poll_until_terminal(&job_a, &ProviderAdapter::RUNWAY, &first, &cancel),
            engine.poll_until_terminal(&job_b, &ProviderAdapter::RUNWAY, &second, &cancel),
        );

        assert_eq!(a.unwrap().result_url(), Some("https://cdn/a"));
        assert_eq!(b.unwrap().result_url(), Some("https://cdn/b"));
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_folds_error_into_failure() {
        let fetcher = ScriptedFetcher::new(vec![Reply::Status(
            json!({"status": "rejected", "result": {"description": "policy violation"}}),
        )]);
        let engine = PollingEngine::new(PollSettings::from_secs(3, 1).unwrap())
            .with_observer(Arc::new(crate::polling::NoopObserver));

        let report = engine
            .settle(
                &Job::new("talk_9"),
                &ProviderAdapter::DID,
                &fetcher,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(report.job_id, "talk_9");
        assert_eq!(report.provider, "d-id");
        assert_eq!(report.attempts, 1);
        match report.outcome {
            Outcome::Failure { reason } => assert!(reason.contains("policy violation")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn settings_validation() {
        assert!(matches!(
            PollSettings::new(Duration::ZERO, 3),
            Err(ConfigError::ZeroInterval)
        ));
        assert!(matches!(
            PollSettings::from_secs(5, 0),
            Err(ConfigError::ZeroAttempts)
        ));
        let settings = PollSettings::from_secs(3, 40).unwrap();
        assert_eq!(settings, PollSettings::DID);
        assert_eq!(settings.poll_interval(), Duration::from_secs(3));
        assert_eq!(PollSettings::default(), PollSettings::RUNWAY);
    }

    #[test]
    fn retry_policy_decisions() {
        let failed = PollError::JobFailed {
            job_id: "j".into(),
            status: "FAILED".into(),
            reason: "r".into(),
        };
        let cancelled = PollError::Cancelled {
            job_id: "j".into(),
            attempts: 1,
        };

        assert_eq!(RetryPolicy::Uniform.decide(&failed, 1, 3), RetryDecision::Retry);
        assert_eq!(RetryPolicy::Uniform.decide(&failed, 3, 3), RetryDecision::GiveUp);
        assert_eq!(RetryPolicy::FailFast.decide(&failed, 1, 3), RetryDecision::GiveUp);
        assert_eq!(RetryPolicy::Uniform.decide(&cancelled, 1, 3), RetryDecision::GiveUp);
    }
}
