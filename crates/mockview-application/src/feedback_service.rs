//! Feedback Synthesizer
//!
//! Turns an interview transcript into a bounded [`FeedbackReport`] by asking
//! the language model for a JSON evaluation and repairing whatever comes back.

use mockview_core::config::FeedbackConfig;
use mockview_core::feedback::{FeedbackReport, repair_feedback};
use mockview_core::llm::{GatewayError, GenerationRequest, LanguageModel};
use mockview_core::prompt::feedback_prompt;
use mockview_core::role::Role;
use mockview_core::session::Message;
use mockview_core::{InterviewError, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

const EVALUATOR_SYSTEM_PROMPT: &str = "You are an expert interview evaluator. \
     Provide constructive, specific feedback in valid JSON format.";

/// Generates feedback reports for completed interviews.
#[derive(Clone)]
pub struct FeedbackService {
    gateway: Arc<dyn LanguageModel>,
    timeout: Duration,
    temperature: f32,
    max_tokens: u32,
}

impl FeedbackService {
    /// Creates a service with the default budget (10s, temperature 0.3, 1000 tokens).
    pub fn new(gateway: Arc<dyn LanguageModel>) -> Self {
        Self::from_config(gateway, &FeedbackConfig::default())
    }

    pub fn from_config(gateway: Arc<dyn LanguageModel>, config: &FeedbackConfig) -> Self {
        Self {
            gateway,
            timeout: config.timeout(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Overrides the time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Generates the feedback report for one session.
    ///
    /// The elapsed time is checked once the model call returns; a late result
    /// is discarded.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session the report belongs to
    /// * `role` - The role whose evaluation criteria apply
    /// * `transcript` - The session's messages in order
    ///
    /// # Errors
    ///
    /// - `FeedbackEngine` if the model call fails (retryable when the backend
    ///   was unreachable)
    /// - `FeedbackTimeout` if the call took longer than the budget
    /// - `FeedbackValidation` if a score is missing or non-numeric
    pub async fn generate_feedback(
        &self,
        session_id: &str,
        role: &Role,
        transcript: &[Message],
    ) -> Result<FeedbackReport> {
        let started = Instant::now();

        let prompt = feedback_prompt(role, transcript)?;
        let request = GenerationRequest::new(prompt)
            .with_system(EVALUATOR_SYSTEM_PROMPT)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let raw = self
            .gateway
            .generate_structured(request, None)
            .await
            .map_err(engine_error)?;

        let elapsed = started.elapsed();
        tracing::info!(
            session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            "Feedback generated"
        );
        if elapsed > self.timeout {
            return Err(InterviewError::FeedbackTimeout {
                elapsed_ms: elapsed.as_millis() as u64,
                limit_ms: self.timeout.as_millis() as u64,
            });
        }

        repair_feedback(session_id, &raw)
    }
}

fn engine_error(err: GatewayError) -> InterviewError {
    tracing::warn!(error = %err, "Feedback generation failed");
    InterviewError::FeedbackEngine {
        message: format!("LLM generation failed: {err}"),
        retryable: err.is_connection(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_are_retryable() {
        let err = engine_error(GatewayError::connection("refused"));
        assert!(err.is_retryable());
        assert!(err.is_feedback());

        let err = engine_error(GatewayError::generation("garbage"));
        assert!(!err.is_retryable());
    }
}
