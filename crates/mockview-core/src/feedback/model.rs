//! Feedback report model.

use crate::persona::round2;
use crate::session::{Message, MessageType};
use serde::{Deserialize, Serialize};

/// Lowest allowed score.
pub const MIN_SCORE: u8 = 1;
/// Highest allowed score.
pub const MAX_SCORE: u8 = 5;
/// Number of strengths and of improvements in every report.
pub const FEEDBACK_ITEMS: usize = 3;
/// Shorter overall feedback is replaced with a generated summary.
pub const MIN_OVERALL_FEEDBACK_CHARS: usize = 50;

/// Scores per evaluation dimension, each in `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub communication: u8,
    pub technical_knowledge: u8,
    pub structure: u8,
}

impl Scores {
    /// Arithmetic mean, rounded to two decimals.
    pub fn average(&self) -> f64 {
        let sum = f64::from(self.communication)
            + f64::from(self.technical_knowledge)
            + f64::from(self.structure);
        round2(sum / 3.0)
    }
}

/// The performance summary of one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub session_id: String,
    pub scores: Scores,
    /// Exactly three non-empty entries
    pub strengths: Vec<String>,
    /// Exactly three non-empty entries
    pub improvements: Vec<String>,
    pub overall_feedback: String,
    /// Timestamp when the report was generated (ISO 8601 format)
    pub generated_at: String,
}

impl FeedbackReport {
    pub fn average_score(&self) -> f64 {
        self.scores.average()
    }
}

/// Simple answer statistics for a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMetrics {
    pub total_answers: usize,
    /// Mean words per answer, rounded to two decimals
    pub avg_answer_length: f64,
    pub total_words: usize,
}

pub fn transcript_metrics(transcript: &[Message]) -> TranscriptMetrics {
    let answers: Vec<&Message> = transcript
        .iter()
        .filter(|message| message.message_type() == MessageType::Answer)
        .collect();
    if answers.is_empty() {
        return TranscriptMetrics {
            total_answers: 0,
            avg_answer_length: 0.0,
            total_words: 0,
        };
    }
    let total_words: usize = answers.iter().map(|message| message.word_count()).sum();
    TranscriptMetrics {
        total_answers: answers.len(),
        avg_answer_length: round2(total_words as f64 / answers.len() as f64),
        total_words,
    }
}
