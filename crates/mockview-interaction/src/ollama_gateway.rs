//! OllamaGateway - HTTP client for a local Ollama server.
//!
//! Talks to `/api/generate` for completions and `/api/tags` for model
//! enumeration and health checks. Transient network failures are retried
//! according to the injected [`RetryPolicy`].

use async_trait::async_trait;
use mockview_core::config::GatewayConfig;
use mockview_core::llm::{
    AttemptError, GatewayError, GenerationRequest, LanguageModel, RetryPolicy, run_with_retry,
};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.1:8b";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Gateway implementation that talks to the Ollama HTTP API.
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl OllamaGateway {
    /// Creates a gateway for the given server and model with default retries.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Builds a gateway from the `[gateway]` configuration section.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(&config.base_url, &config.model)
            .with_timeout(config.request_timeout())
            .with_retry_policy(RetryPolicy::from(&config.retry))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request, classifying failures for the retry loop.
    async fn send_once(&self, request: reqwest::RequestBuilder) -> Result<Response, AttemptError> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| AttemptError::Transient(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(AttemptError::Permanent(map_http_error(status, body_text)));
        }

        Ok(response)
    }

    async fn fetch_tags(&self) -> Result<TagsResponse, GatewayError> {
        let url = self.endpoint("/api/tags");
        let url = url.as_str();
        let response = run_with_retry(&self.retry, "ollama.tags", move |_| {
            self.send_once(self.client.get(url))
        })
        .await?;

        response
            .json::<TagsResponse>()
            .await
            .map_err(|err| GatewayError::generation(format!("Failed to parse Ollama tags: {err}")))
    }
}

impl Default for OllamaGateway {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

#[async_trait]
impl LanguageModel for OllamaGateway {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GatewayError> {
        if request.has_empty_prompt() {
            return Err(GatewayError::EmptyPrompt);
        }

        let body = GenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            system: request.system.as_deref().filter(|s| !s.is_empty()),
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };
        let url = self.endpoint("/api/generate");

        tracing::debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            temperature = request.temperature,
            "Sending generate request"
        );

        let (url, body) = (url.as_str(), &body);
        let response = run_with_retry(&self.retry, "ollama.generate", move |_| {
            self.send_once(self.client.post(url).json(body))
        })
        .await?;

        let parsed: serde_json::Value = response.json().await.map_err(|err| {
            GatewayError::generation(format!("Failed to parse Ollama response: {err}"))
        })?;

        match parsed.get("response").and_then(|value| value.as_str()) {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(GatewayError::generation(format!(
                "Unexpected response format: {parsed}"
            ))),
        }
    }

    async fn check_health(&self) -> bool {
        match self.fetch_tags().await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "Ollama health check failed");
                false
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let tags = self.fetch_tags().await?;
        Ok(tags.models.into_iter().map(|model| model.name).collect())
    }
}

fn map_http_error(status: reqwest::StatusCode, body: String) -> GatewayError {
    let detail = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body
    };
    GatewayError::generation(format!("HTTP error {}: {}", status.as_u16(), detail))
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}
