//! HTTP clients for the supported generation providers.

pub mod did;
pub mod error;
pub mod http;
pub mod runway;
pub mod types;

use std::future::Future;

use crate::polling::Job;

pub use did::DidClient;
pub use error::{SubmitError, TransportError};
pub use runway::RunwayClient;
pub use types::{Options, RunwayTask, TalkRequest, TalkScript, VoiceProvider};

/// Creates jobs on a provider. The polling engine never calls this itself.
pub trait JobSubmitter {
    type Request;

    /// Submit `request` and return the id the provider assigned.
    fn submit(
        &self,
        request: &Self::Request,
    ) -> impl Future<Output = Result<Job, SubmitError>> + Send;
}
