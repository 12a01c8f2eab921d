//! Interview archive trait.
//!
//! The archive is the persistence collaborator of the orchestrator. Callers
//! treat it as fire-and-forget: failures are logged, never propagated into
//! the live interview.

use crate::error::Result;
use crate::feedback::FeedbackReport;
use crate::session::{Message, Session, SessionStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One row of the interview history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub role: String,
    /// Session creation time (ISO 8601 format)
    pub date: String,
    /// Average feedback score, if feedback was generated
    pub score: Option<f64>,
    pub status: SessionStatus,
}

/// Past interviews, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewHistory {
    pub sessions: Vec<SessionSummary>,
    pub total_interviews: usize,
    /// Mean over sessions that have a score
    pub average_score: Option<f64>,
}

/// Durable record of sessions, messages and feedback.
#[async_trait]
pub trait InterviewArchive: Send + Sync {
    /// Records a newly created session.
    async fn save_session(&self, session: &Session) -> Result<()>;

    /// Records the latest state of a session (status, progress).
    async fn update_session(&self, session: &Session) -> Result<()>;

    /// Appends a message to a session's stored transcript.
    async fn save_message(&self, session_id: &str, message: &Message) -> Result<()>;

    async fn save_feedback(&self, report: &FeedbackReport) -> Result<()>;

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>>;

    /// Lists past interviews, newest first, limited to `limit` entries.
    async fn get_user_history(&self, limit: Option<usize>) -> Result<InterviewHistory>;

    /// Returns a session's stored transcript in order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session was never archived.
    async fn get_session_transcript(&self, session_id: &str) -> Result<Vec<Message>>;
}
