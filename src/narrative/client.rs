use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{NarrativeError, NarrativeResult};

#[async_trait]
/// Turns a prompt into free-form model output.
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> NarrativeResult<String>;

    /// Short identifier for logs and API responses.
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    endpoint: String,
    model: String,
    http: HttpClient,
}

impl OllamaClient {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> NarrativeResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(NarrativeError::ClientBuild)?;

        Ok(Self {
            endpoint: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NarrativeGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> NarrativeResult<String> {
        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Requesting narrative"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "LLM request rejected");
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = resp.json().await?;
        body.response.ok_or(NarrativeError::MissingResponse)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
