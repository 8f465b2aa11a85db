use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};

use super::JobSubmitter;
use super::error::{SubmitError, TransportError};
use super::http::{build_http_client, normalize_base_url, read_json_object};
use super::types::TalkRequest;
use crate::polling::{Job, StatusFetcher, StatusSnapshot};

pub const API_URL: &str = "https://api.d-id.com";

const PROVIDER: &str = "d-id";

/// Client for the D-ID talks API.
///
/// Authenticates with HTTP Basic, using the API key as the user name and an
/// empty password.
pub struct DidClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl DidClient {
    pub fn new(api_key: String) -> Result<Self, TransportError> {
        Self::with_base_url(api_key, API_URL.to_string())
    }

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

    /// `POST /talks`; returns the creation response.
    pub async fn create_talk(
        &self,
        request: &TalkRequest,
    ) -> Result<Map<String, Value>, TransportError> {
        let response = self
            .client
            .post(format!("{}/talks", self.base_url))
            .basic_auth(&self.api_key, Some(""))
            .header(ACCEPT, "application/json")
            .json(&request.payload())
            .send()
            .await?;

        read_json_object(response).await
    }

    /// `GET /talks/{id}`.
    pub async fn get_talk_status(&self, talk_id: &str) -> Result<StatusSnapshot, TransportError> {
        let response = self
            .client
            .get(format!("{}/talks/{talk_id}", self.base_url))
            .basic_auth(&self.api_key, Some(""))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        read_json_object(response).await.map(StatusSnapshot::new)
    }
}

impl StatusFetcher for DidClient {
    async fn fetch_status(&self, job_id: &str) -> Result<StatusSnapshot, TransportError> {
        self.get_talk_status(job_id).await
    }
}

impl JobSubmitter for DidClient {
    type Request = TalkRequest;

    async fn submit(&self, request: &TalkRequest) -> Result<Job, SubmitError> {
        let body = Value::Object(self.create_talk(request).await?);
        let job = Job::from_creation_response(&body)
            .ok_or(SubmitError::MissingJobId { provider: PROVIDER })?;
        tracing::info!(job_id = job.id(), "d-id talk submitted");
        Ok(job)
    }
}
