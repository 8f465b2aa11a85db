use reqwest::Client;
use serde_json::{Map, Value};

use super::JobSubmitter;
use super::error::{SubmitError, TransportError};
use super::http::{build_http_client, normalize_base_url, read_json_object};
use super::types::{Options, RunwayTask};
use crate::polling::{Job, StatusFetcher, StatusSnapshot};

pub const API_URL: &str = "https://api.runwayml.com";

const PROVIDER: &str = "runway";

/// Client for the Runway tasks API.
pub struct RunwayClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl RunwayClient {
    pub fn new(api_key: String) -> Result<Self, TransportError> {
        Self::with_base_url(api_key, API_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, TransportError> {
        Ok(Self::with_client(build_http_client()?, api_key, base_url))
    }

    pub fn with_client(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /v1/tasks` with a raw payload; returns the creation response.
    pub async fn create_task(&self, payload: &Value) -> Result<Map<String, Value>, TransportError> {
        let response = self
            .client
            .post(format!("{}/v1/tasks", self.base_url))
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        read_json_object(response).await
    }

    pub async fn generate_image_from_text(
        &self,
        prompt: &str,
        options: Options,
    ) -> Result<Job, SubmitError> {
        self.submit(&RunwayTask::text_to_image(prompt).with_options(options))
            .await
    }

    pub async fn generate_video_from_image(
        &self,
        image_url: &str,
        prompt: Option<&str>,
        options: Options,
    ) -> Result<Job, SubmitError> {
        let task = RunwayTask::image_to_video(image_url, prompt.map(str::to_string))
            .with_options(options);
        self.submit(&task).await
    }

    /// `GET /v1/tasks/{id}`.
    pub async fn get_task_status(&self, task_id: &str) -> Result<StatusSnapshot, TransportError> {
        let response = self
            .client
            .get(format!("{}/v1/tasks/{task_id}", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        read_json_object(response).await.map(StatusSnapshot::new)
    }
}

impl StatusFetcher for RunwayClient {
    async fn fetch_status(&self, job_id: &str) -> Result<StatusSnapshot, TransportError> {
        self.get_task_status(job_id).await
    }
}

impl JobSubmitter for RunwayClient {
    type Request = RunwayTask;

    async fn submit(&self, request: &RunwayTask) -> Result<Job, SubmitError> {
        let body = Value::Object(self.create_task(&request.payload()).await?);
        let job = Job::from_creation_response(&body)
            .ok_or(SubmitError::MissingJobId { provider: PROVIDER })?;
        tracing::info!(job_id = job.id(), "runway task submitted");
        Ok(job)
    }
}
