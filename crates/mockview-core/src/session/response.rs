//! The result of processing one answer.

use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// What the interviewer says next.
///
/// Serialized with a `type` tag of `followup`, `question` or `complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InterviewTurn {
    /// A probing question about the current main question.
    Followup {
        content: String,
        /// 1-based number of the question being followed up on
        question_number: usize,
        persona: Persona,
    },
    /// A transition phrase followed by the next main question.
    #[serde(rename = "question")]
    NextQuestion {
        content: String,
        /// 1-based number of the new question
        question_number: usize,
        persona: Persona,
    },
    /// The interview is over.
    Complete {
        content: String,
        /// Number of questions answered
        question_number: usize,
        persona: Persona,
    },
}

impl InterviewTurn {
    pub fn content(&self) -> &str {
        match self {
            InterviewTurn::Followup { content, .. }
            | InterviewTurn::NextQuestion { content, .. }
            | InterviewTurn::Complete { content, .. } => content,
        }
    }

    pub fn question_number(&self) -> usize {
        match self {
            InterviewTurn::Followup {
                question_number, ..
            }
            | InterviewTurn::NextQuestion {
                question_number, ..
            }
            | InterviewTurn::Complete {
                question_number, ..
            } => *question_number,
        }
    }

    pub fn persona(&self) -> &Persona {
        match self {
            InterviewTurn::Followup { persona, .. }
            | InterviewTurn::NextQuestion { persona, .. }
            | InterviewTurn::Complete { persona, .. } => persona,
        }
    }

    /// Wire name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            InterviewTurn::Followup { .. } => "followup",
            InterviewTurn::NextQuestion { .. } => "question",
            InterviewTurn::Complete { .. } => "complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, InterviewTurn::Complete { .. })
    }
}
