//! Gateway error types.

use crate::error::InterviewError;
use thiserror::Error;

/// Failures of a language-model gateway.
///
/// `Connection` means the backend could not be reached (after retries);
/// `Generation` means it answered but the answer was unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Generation(String),

    #[error("Prompt cannot be empty")]
    EmptyPrompt,
}

impl GatewayError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<GatewayError> for InterviewError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Connection(message) => InterviewError::Connection(message),
            GatewayError::Generation(message) => InterviewError::Generation(message),
            GatewayError::EmptyPrompt => InterviewError::invalid_input("Prompt cannot be empty"),
        }
    }
}
