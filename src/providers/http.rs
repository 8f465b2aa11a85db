use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::{Map, Value};

use super::error::TransportError;

/// Shared HTTP client settings for every provider.
pub fn build_http_client() -> Result<Client, TransportError> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()?;
    Ok(client)
}

/// Check the status of `response` and read its body as a JSON object.
pub(crate) async fn read_json_object(
    response: Response,
) -> Result<Map<String, Value>, TransportError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(TransportError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(TransportError::MalformedBody(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(err) => Err(TransportError::MalformedBody(err.to_string())),
    }
}

/// Trim a trailing slash so endpoint paths can be appended directly.
pub(crate) fn normalize_base_url(base_url: String) -> String {
    match base_url.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => base_url,
    }
}
