//! Interview message types.
//!
//! Messages are immutable once created; the only way to obtain one is
//! through a validating constructor.

use crate::error::{InterviewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a message and in what capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// A main question asked by the interviewer.
    Question,
    /// The candidate's answer.
    Answer,
    /// A probing question about the current main question.
    Followup,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Question => "question",
            MessageType::Answer => "answer",
            MessageType::Followup => "followup",
        }
    }

    /// Whether the interviewer produced the message.
    pub fn is_interviewer(&self) -> bool {
        matches!(self, MessageType::Question | MessageType::Followup)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record in an interview transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    message_type: MessageType,
    content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    timestamp: String,
}

impl Message {
    /// Creates a message stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `content` is empty after trimming.
    pub fn new(message_type: MessageType, content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(InterviewError::invalid_input(format!(
                "{message_type} content cannot be empty"
            )));
        }
        Ok(Self {
            message_type,
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn question(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageType::Question, content)
    }

    pub fn answer(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageType::Answer, content)
    }

    pub fn followup(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageType::Followup, content)
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Whitespace-separated word count of the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_is_rejected() {
        let err = Message::answer("  \n\t ").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_message_serializes_with_type_tag() {
        let message = Message::followup("Can you give an example?").unwrap();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "followup");
        assert_eq!(json["content"], "Can you give an example?");
        assert!(json["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_word_count() {
        let message = Message::answer("  three   small words ").unwrap();
        assert_eq!(message.word_count(), 3);
    }
}
