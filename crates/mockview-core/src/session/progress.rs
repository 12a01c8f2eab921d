//! Progress snapshot of a session.

use super::model::{Session, SessionStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub session_id: String,
    pub role: String,
    /// 1-based number of the question being asked, capped at the total
    pub current_question: usize,
    pub total_questions: usize,
    /// Percentage rounded to one decimal
    pub progress_percentage: f64,
    pub followup_count: u8,
    pub status: SessionStatus,
}

impl SessionProgress {
    pub fn from_session(session: &Session, total_questions: usize) -> Self {
        let current_question = (session.current_question_index() + 1).min(total_questions);
        let progress_percentage = if total_questions > 0 {
            let raw = current_question as f64 / total_questions as f64 * 100.0;
            (raw * 10.0).round() / 10.0
        } else {
            0.0
        };
        Self {
            session_id: session.id().to_string(),
            role: session.role().to_string(),
            current_question,
            total_questions,
            progress_percentage,
            followup_count: session.followup_count(),
            status: session.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InterviewMode;

    #[test]
    fn test_progress_rounds_to_one_decimal() {
        let mut session = Session::new("backend_engineer", InterviewMode::Chat);
        session.advance_question().unwrap();
        let progress = SessionProgress::from_session(&session, 3);
        assert_eq!(progress.current_question, 2);
        assert_eq!(progress.progress_percentage, 66.7);
    }

    #[test]
    fn test_progress_is_capped_after_last_question() {
        let mut session = Session::new("backend_engineer", InterviewMode::Chat);
        for _ in 0..8 {
            session.advance_question().unwrap();
        }
        let progress = SessionProgress::from_session(&session, 8);
        assert_eq!(progress.current_question, 8);
        assert_eq!(progress.progress_percentage, 100.0);
    }

    #[test]
    fn test_progress_without_questions() {
        let session = Session::new("backend_engineer", InterviewMode::Chat);
        let progress = SessionProgress::from_session(&session, 0);
        assert_eq!(progress.progress_percentage, 0.0);
    }
}
