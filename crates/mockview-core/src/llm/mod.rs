//! Language-model gateway abstraction.
//!
//! # Module Structure
//!
//! - `request`: `GenerationRequest` builder
//! - `error`: `GatewayError` (connection vs. generation failures)
//! - `retry`: `RetryPolicy` and the shared retry loop
//! - `structured`: JSON-only prompting, fence stripping and key validation

mod error;
mod request;
pub mod retry;
pub mod structured;

pub use error::GatewayError;
pub use request::{DEFAULT_TEMPERATURE, GenerationRequest};
pub use retry::{AttemptError, RetryPolicy, run_with_retry};
pub use structured::StructuredSchema;

use async_trait::async_trait;
use serde_json::Value;

/// A generative-text backend.
///
/// Implementations retry transient failures internally and report what
/// remains as [`GatewayError::Connection`]; unusable replies are
/// [`GatewayError::Generation`].
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates text for a prompt. The result is trimmed.
    ///
    /// # Errors
    ///
    /// - `EmptyPrompt` before any network call if the prompt is blank
    /// - `Connection` after retries are exhausted
    /// - `Generation` for protocol errors or malformed replies
    async fn generate(&self, request: GenerationRequest) -> Result<String, GatewayError>;

    /// Whether the backend is reachable. Never fails.
    async fn check_health(&self) -> bool;

    /// Names of the models the backend can serve.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;

    /// Generates a JSON reply and parses it.
    ///
    /// Both the prompt and the system message are extended with JSON-only
    /// instructions; a surrounding code fence is stripped before parsing.
    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: Option<&StructuredSchema>,
    ) -> Result<Value, GatewayError> {
        if request.has_empty_prompt() {
            return Err(GatewayError::EmptyPrompt);
        }
        let raw = self.generate(structured::json_only(request)).await?;
        structured::parse_structured(&raw, schema)
    }
}
