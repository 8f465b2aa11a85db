mod adapter;
mod classifier;
mod engine;
mod extract;
mod observer;
mod outcome;
mod poller;
mod snapshot;

pub use adapter::{Provider, ProviderAdapter};
pub use classifier::{DID_VOCABULARY, ProviderVocabulary, RUNWAY_VOCABULARY, classify};
pub use engine::{PollSettings, PollingEngine, RetryDecision, RetryPolicy};
pub use extract::{ErrorLocation, ResultLocation};
pub use observer::{NoopObserver, PollEvent, PollObserver, TracingObserver};
pub use outcome::{Outcome, PollReport, Status};
pub use poller::{StatusFetcher, StatusPoller};
pub use snapshot::{Job, STATUS_FIELD, StatusSnapshot};
