//! Error types for the Mockview application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Mockview application.
///
/// Variants follow the interview lifecycle: caller mistakes (`InvalidInput`),
/// missing references (`NotFound`), lifecycle violations (`InvalidState`),
/// language-model failures (`Connection`, `Generation`) and the feedback
/// pipeline (`FeedbackValidation`, `FeedbackTimeout`, `FeedbackEngine`).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterviewError {
    /// Caller supplied malformed or out-of-policy data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Operation is not allowed in the entity's current lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Language-model backend unreachable after retries
    #[error("Connection error: {0}")]
    Connection(String),

    /// Language-model backend reachable but produced unusable output
    #[error("Generation error: {0}")]
    Generation(String),

    /// Feedback payload could not be repaired into a report
    #[error("Feedback validation error: {0}")]
    FeedbackValidation(String),

    /// Feedback generation exceeded its time budget
    #[error("Feedback generation took {elapsed_ms}ms, exceeding {limit_ms}ms limit")]
    FeedbackTimeout { elapsed_ms: u64, limit_ms: u64 },

    /// Feedback generation failed in the language-model layer
    #[error("Feedback engine error: {message}")]
    FeedbackEngine { message: String, retryable: bool },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InterviewError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a FeedbackValidation error
    pub fn feedback_validation(message: impl Into<String>) -> Self {
        Self::FeedbackValidation(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Check if this error comes from the feedback pipeline
    pub fn is_feedback(&self) -> bool {
        matches!(
            self,
            Self::FeedbackValidation(_) | Self::FeedbackTimeout { .. } | Self::FeedbackEngine { .. }
        )
    }

    /// Whether the end user should be told to retry later.
    ///
    /// Only backend unavailability qualifies. Generation failures are not
    /// retryable here; the user is asked to resubmit instead.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::FeedbackEngine { retryable, .. } => *retryable,
            _ => false,
        }
    }

    /// Text safe to show to an end user.
    ///
    /// Input and state errors are reported specifically. Everything that
    /// originates below the domain layer is reported generically.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(message) | Self::InvalidState(message) => message.clone(),
            Self::NotFound { entity_type, id } => format!(
                "The {entity_type} '{id}' was not found. It may have expired or been deleted."
            ),
            Self::Connection(_) => "The interview service is temporarily unavailable. \
                 Please make sure the language model is running and try again in a moment."
                .to_string(),
            Self::Generation(_) => {
                "Failed to generate a response. Please try submitting your answer again.".to_string()
            }
            Self::FeedbackTimeout { .. } => {
                "Feedback took too long to generate. Please try again.".to_string()
            }
            Self::FeedbackEngine { retryable: true, .. } => {
                "The feedback service is temporarily unavailable. Please try again later."
                    .to_string()
            }
            Self::FeedbackValidation(_) | Self::FeedbackEngine { .. } => {
                "Failed to generate feedback. Please try again.".to_string()
            }
            _ => "An unexpected error occurred.".to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for InterviewError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for InterviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for InterviewError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for InterviewError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, InterviewError>`.
pub type Result<T> = std::result::Result<T, InterviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_is_retryable() {
        assert!(InterviewError::Connection("down".into()).is_retryable());
        assert!(!InterviewError::Generation("garbage".into()).is_retryable());
        assert!(!InterviewError::invalid_input("empty").is_retryable());
    }

    #[test]
    fn test_user_message_does_not_leak_internals() {
        let err = InterviewError::internal("mutex poisoned at store.rs:42");
        assert_eq!(err.user_message(), "An unexpected error occurred.");

        let err = InterviewError::Connection("tcp connect error 127.0.0.1:11434".into());
        assert!(!err.user_message().contains("127.0.0.1"));
    }

    #[test]
    fn test_user_message_is_specific_for_input_errors() {
        let err = InterviewError::invalid_input("Answer cannot be empty");
        assert_eq!(err.user_message(), "Answer cannot be empty");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: InterviewError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "roles.json").into();
        match err {
            InterviewError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
