//! HTTP clients for the text and image endpoints.
//!
//! Both endpoints take a JSON body, authenticate with a `key` query
//! parameter, and wrap their answer in a provider-specific envelope. The
//! backends own the transport concerns (status, deadline, envelope
//! extraction); validating what is inside the envelope is left to
//! [`crate::parse`] and [`crate::image`].

use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{GenerateError, Stage, UpstreamReason};

/// An image blob as returned by the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// Base64-encoded image bytes.
    pub base64: String,
    /// MIME type reported by the endpoint, if any.
    pub mime_type: Option<String>,
}

/// Connection details shared by both endpoints.
#[derive(Clone)]
struct Endpoint {
    client: reqwest::Client,
    url: String,
    api_key: String,
    timeout: Duration,
    stage: Stage,
}

impl Endpoint {
    /// POST `body` and return the parsed JSON envelope.
    async fn post<B: Serialize + Sync>(&self, body: &B) -> Result<serde_json::Value, GenerateError> {
        let stage = self.stage;
        match timeout(self.timeout, self.send(body)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(
                    %stage,
                    timeout_ms = self.timeout.as_millis(),
                    "upstream call exceeded deadline"
                );
                Err(GenerateError::Upstream {
                    stage,
                    reason: UpstreamReason::Timeout,
                })
            }
        }
    }

    async fn send<B: Serialize + Sync>(&self, body: &B) -> Result<serde_json::Value, GenerateError> {
        let stage = self.stage;

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            // The URL carries the API key; keep it out of error messages.
            .map_err(|e| GenerateError::Upstream {
                stage,
                reason: UpstreamReason::Transport(e.without_url().to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            warn!(
                %stage,
                status = status.as_u16(),
                body = %error_body,
                "upstream returned error status"
            );
            return Err(GenerateError::Upstream {
                stage,
                reason: UpstreamReason::Status(status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| GenerateError::Upstream {
            stage,
            reason: UpstreamReason::Transport(e.without_url().to_string()),
        })?;
        debug!(%stage, bytes = bytes.len(), "upstream response received");

        serde_json::from_slice(&bytes)
            .map_err(|e| GenerateError::malformed(stage, format!("envelope is not JSON: {e}")))
    }
}

/// Client for the text-generation endpoint.
#[derive(Clone)]
pub struct TextBackend {
    endpoint: Endpoint,
}

impl TextBackend {
    /// Create a text backend sharing `client`.
    pub fn new(client: reqwest::Client, url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            endpoint: Endpoint {
                client,
                url: url.to_owned(),
                api_key: api_key.to_owned(),
                timeout,
                stage: Stage::Text,
            },
        }
    }

    /// Send a text payload and return the model's answer text.
    pub async fn complete(&self, payload: &serde_json::Value) -> Result<String, GenerateError> {
        let envelope = self.endpoint.post(payload).await?;
        extract_candidate_text(&envelope)
    }
}

/// Client for the image-generation endpoint.
#[derive(Clone)]
pub struct ImageBackend {
    endpoint: Endpoint,
}

impl ImageBackend {
    /// Create an image backend sharing `client`.
    pub fn new(client: reqwest::Client, url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            endpoint: Endpoint {
                client,
                url: url.to_owned(),
                api_key: api_key.to_owned(),
                timeout,
                stage: Stage::Image,
            },
        }
    }

    /// Send an image payload and return the first predicted image.
    pub async fn render<B: Serialize + Sync>(&self, payload: &B) -> Result<ImageBlob, GenerateError> {
        let envelope = self.endpoint.post(payload).await?;
        extract_prediction(&envelope)
    }
}

/// Extract `candidates[0].content.parts[0].text` from a text envelope.
fn extract_candidate_text(json: &serde_json::Value) -> Result<String, GenerateError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GenerateError::malformed(
                Stage::Text,
                "response missing candidates[0].content.parts[0].text",
            )
        })
}

/// Extract `predictions[0]` from an image envelope.
fn extract_prediction(json: &serde_json::Value) -> Result<ImageBlob, GenerateError> {
    let prediction = json
        .get("predictions")
        .and_then(|p| p.get(0))
        .ok_or_else(|| GenerateError::malformed(Stage::Image, "response missing predictions[0]"))?;

    let base64 = prediction
        .get("bytesBase64Encoded")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GenerateError::malformed(
                Stage::Image,
                "response missing predictions[0].bytesBase64Encoded",
            )
        })?;

    let mime_type = prediction
        .get("mimeType")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned);

    Ok(ImageBlob { base64, mime_type })
}
