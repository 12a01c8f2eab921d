//! Root configuration model.
//!
//! Every section and field has a default, so a partial (or absent)
//! `config.toml` is always valid.

use crate::llm::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RootConfig {
    pub gateway: GatewayConfig,
    pub feedback: FeedbackConfig,
    pub interview: InterviewConfig,
    pub storage: StorageConfig,
}

/// Connection settings for the generative-text backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    pub retry: RetryConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            request_timeout_secs: 60,
            retry: RetryConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            jitter_ms: 0,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy::new(
            config.max_attempts,
            Duration::from_millis(config.initial_delay_ms),
        )
        .with_jitter(Duration::from_millis(config.jitter_ms))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Wall-clock budget checked after the model call returns
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            temperature: 0.3,
            max_tokens: 1000,
        }
    }
}

impl FeedbackConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InterviewConfig {
    pub followup_temperature: f32,
    /// Answers longer than this are rejected at the boundary
    pub max_answer_words: usize,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            followup_temperature: 0.7,
            max_answer_words: 2000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Role catalog JSON; the built-in catalog is used when unset
    pub roles_file: Option<PathBuf>,
    /// Interview archive directory; the platform data directory when unset
    pub archive_dir: Option<PathBuf>,
}
