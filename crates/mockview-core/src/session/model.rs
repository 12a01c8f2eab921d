//! Session domain model.
//!
//! A `Session` is one interview attempt. Its fields are private: every
//! mutation goes through a method that enforces the lifecycle rules
//! (completed sessions are frozen, the question index never decreases, and
//! at most [`MAX_FOLLOWUPS_PER_QUESTION`] follow-ups are recorded per
//! question).

use super::message::{Message, MessageType};
use crate::error::{InterviewError, Result};
use crate::persona::Persona;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Follow-ups allowed before the interview must advance.
pub const MAX_FOLLOWUPS_PER_QUESTION: u8 = 3;

/// How the candidate interacts with the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    Chat,
    Voice,
}

impl InterviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Chat => "chat",
            InterviewMode::Voice => "voice",
        }
    }
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewMode {
    type Err = InterviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chat" => Ok(InterviewMode::Chat),
            "voice" => Ok(InterviewMode::Voice),
            other => Err(InterviewError::invalid_input(format!(
                "Invalid mode '{other}'. Must be 'chat' or 'voice'"
            ))),
        }
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    /// Terminal: no further mutation is permitted.
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interview attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    id: String,
    /// Role name the candidate is interviewing for
    role: String,
    mode: InterviewMode,
    /// Timestamp when the session was created (ISO 8601 format)
    created_at: String,
    /// Timestamp when the session was last mutated (ISO 8601 format)
    updated_at: String,
    status: SessionStatus,
    /// 0-based index into the role's question list
    current_question_index: usize,
    /// Follow-ups asked about the current question
    followup_count: u8,
    messages: Vec<Message>,
    /// Latest persona verdict; transient bias for the next classification
    #[serde(default)]
    persona: Persona,
}

impl Session {
    /// Creates an active session positioned at the first question.
    pub fn new(role: impl Into<String>, mode: InterviewMode) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            role: role.into(),
            mode,
            created_at: now.clone(),
            updated_at: now,
            status: SessionStatus::Active,
            current_question_index: 0,
            followup_count: 0,
            messages: Vec::new(),
            persona: Persona::initial(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn followup_count(&self) -> u8 {
        self.followup_count
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether another follow-up may be asked about the current question.
    pub fn can_ask_followup(&self) -> bool {
        self.followup_count < MAX_FOLLOWUPS_PER_QUESTION
    }

    /// Fails with `InvalidState` unless the session is active.
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(InterviewError::invalid_state(format!(
                "Session {} is already completed",
                self.id
            )))
        }
    }

    /// Appends a question or answer message.
    ///
    /// Follow-ups must go through [`Session::record_followup`] so the cap is
    /// enforced.
    pub fn append_message(&mut self, message: Message) -> Result<()> {
        self.ensure_active()?;
        if message.message_type() == MessageType::Followup {
            return Err(InterviewError::internal(
                "follow-up messages must be recorded with record_followup",
            ));
        }
        self.messages.push(message);
        self.touch();
        Ok(())
    }

    /// Appends a follow-up message and bumps the follow-up count.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is completed or the cap is reached
    /// - `Internal` if `message` is not a follow-up
    pub fn record_followup(&mut self, message: Message) -> Result<()> {
        self.ensure_active()?;
        if message.message_type() != MessageType::Followup {
            return Err(InterviewError::internal(format!(
                "expected a followup message, got {}",
                message.message_type()
            )));
        }
        if !self.can_ask_followup() {
            return Err(InterviewError::invalid_state(format!(
                "Question {} already has {} follow-ups",
                self.current_question_index + 1,
                MAX_FOLLOWUPS_PER_QUESTION
            )));
        }
        self.followup_count += 1;
        self.messages.push(message);
        self.touch();
        Ok(())
    }

    /// Moves to the next question and resets the follow-up count.
    ///
    /// # Returns
    ///
    /// The new 0-based question index.
    pub fn advance_question(&mut self) -> Result<usize> {
        self.ensure_active()?;
        self.current_question_index += 1;
        self.followup_count = 0;
        self.touch();
        Ok(self.current_question_index)
    }

    /// Stores the latest persona verdict.
    pub fn set_persona(&mut self, persona: Persona) -> Result<()> {
        self.ensure_active()?;
        self.persona = persona;
        Ok(())
    }

    /// Marks the session completed. Calling it again is harmless.
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.touch();
    }

    /// Number of answers the candidate has given.
    pub fn answer_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.message_type() == MessageType::Answer)
            .count()
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
