//! Generation workflows built on a provider client and a [`PollingEngine`].
//!
//! [`VideoService`] covers the Runway flows (image to video, style transfer,
//! text to video); [`AvatarService`] covers D-ID talking avatars. Both take
//! the client as a generic so tests can substitute scripted fakes.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{PipelineError, PollError};
use crate::polling::{
    Job, Outcome, PollSettings, PollingEngine, ProviderAdapter, RetryPolicy, StatusFetcher,
    StatusSnapshot,
};
use crate::providers::types::STYLE_REFERENCE_OPTION;
use crate::providers::{
    JobSubmitter, Options, RunwayTask, SubmitError, TalkRequest, TransportError, VoiceProvider,
};

/// Runway video workflows.
pub struct VideoService<C> {
    client: C,
    engine: PollingEngine,
    image_step: PollSettings,
}

impl<C> VideoService<C>
where
    C: StatusFetcher + JobSubmitter<Request = RunwayTask>,
{
    pub fn new(client: C, engine: PollingEngine) -> Self {
        Self {
            client,
            engine,
            image_step: PollSettings::IMAGE_STEP,
        }
    }

    pub fn with_image_step_settings(mut self, settings: PollSettings) -> Self {
        self.image_step = settings;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn image_to_video(
        &self,
        image_url: &str,
        prompt: Option<&str>,
        options: Options,
    ) -> Result<Job, SubmitError> {
        let task = RunwayTask::image_to_video(image_url, prompt.map(str::to_string))
            .with_options(options);
        self.client.submit(&task).await
    }

    /// Image to video guided by a style reference image.
    ///
    /// The caller's options are kept; the style image is added under
    /// `style_reference_image_url`, replacing any value already there.
    pub async fn style_transfer(
        &self,
        image_url: &str,
        style_image_url: &str,
        prompt: Option<&str>,
        options: Options,
    ) -> Result<Job, SubmitError> {
        tracing::info!(image_url, style_image_url, "submitting style transfer");
        let task = RunwayTask::image_to_video(image_url, prompt.map(str::to_string))
            .with_options(options)
            .with_option(STYLE_REFERENCE_OPTION, style_image_url);
        self.client.submit(&task).await
    }

    /// Generate an image from `prompt`, wait for it, then animate it.
    ///
    /// The image step never retries errors. Returns the video job, which
    /// the caller polls separately.
    pub async fn text_to_video(
        &self,
        prompt: &str,
        image_options: Options,
        video_options: Options,
        cancel: &CancellationToken,
    ) -> Result<Job, PipelineError> {
        let image_job = self
            .client
            .submit(&RunwayTask::text_to_image(prompt).with_options(image_options))
            .await?;

        let image_engine = self
            .engine
            .clone()
            .with_settings(self.image_step)
            .with_policy(RetryPolicy::FailFast);
        let outcome = image_engine
            .poll_until_terminal(&image_job, &ProviderAdapter::RUNWAY, &self.client, cancel)
            .await?;

        // Without an error the engine only stops on success or on its last attempt.
        let Outcome::Success {
            result_url: image_url,
        } = outcome
        else {
            return Err(PipelineError::StepTimedOut {
                job_id: image_job.id().to_string(),
                attempts: image_engine.settings().max_attempts(),
            });
        };
        tracing::info!(image_job = image_job.id(), %image_url, "intermediate image ready");

        let video_task = RunwayTask::image_to_video(image_url, Some(prompt.to_string()))
            .with_options(video_options);
        Ok(self.client.submit(&video_task).await?)
    }

    /// One raw status query.
    pub async fn check_status(&self, job: &Job) -> Result<StatusSnapshot, TransportError> {
        self.client.fetch_status(job.id()).await
    }

    pub async fn completed_video_url(
        &self,
        job: &Job,
        cancel: &CancellationToken,
    ) -> Result<Outcome, PollError> {
        self.engine
            .poll_until_terminal(job, &ProviderAdapter::RUNWAY, &self.client, cancel)
            .await
    }
}

/// D-ID talking avatar workflow.
pub struct AvatarService<C> {
    client: C,
    engine: PollingEngine,
    default_voice: VoiceProvider,
}

impl<C> AvatarService<C>
where
    C: StatusFetcher + JobSubmitter<Request = TalkRequest>,
{
    pub fn new(client: C, engine: PollingEngine) -> Self {
        Self {
            client,
            engine,
            default_voice: VoiceProvider::default(),
        }
    }

    pub fn with_default_voice(mut self, voice: VoiceProvider) -> Self {
        self.default_voice = voice;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit a talk speaking `text`.
    ///
    /// `voice_id` and `voice_provider` fall back to the service defaults
    /// independently. `options` is merged into the talk payload.
    pub async fn submit_talk(
        &self,
        image_url: &str,
        text: &str,
        voice_id: Option<&str>,
        voice_provider: Option<&str>,
        options: Options,
    ) -> Result<Job, SubmitError> {
        let voice = VoiceProvider::new(
            voice_provider.unwrap_or(self.default_voice.kind.as_str()),
            voice_id.unwrap_or(self.default_voice.voice_id.as_str()),
        );
        tracing::info!(image_url, voice = %voice.voice_id, provider = %voice.kind, "submitting avatar talk");

        let request = TalkRequest::text(image_url, text, voice)?.with_config(options);
        self.client.submit(&request).await
    }

    pub async fn check_status(&self, job: &Job) -> Result<StatusSnapshot, TransportError> {
        self.client.fetch_status(job.id()).await
    }

    pub async fn completed_avatar_video_url(
        &self,
        job: &Job,
        cancel: &CancellationToken,
    ) -> Result<Outcome, PollError> {
        self.engine
            .poll_until_terminal(job, &ProviderAdapter::DID, &self.client, cancel)
            .await
    }
}

/// Total wall-clock budget of `settings` when every attempt is in progress.
///
/// Saturates at [`Duration::MAX`] for intervals too large to multiply.
pub fn polling_budget(settings: PollSettings) -> Duration {
    settings
        .poll_interval()
        .saturating_mul(settings.max_attempts())
}
