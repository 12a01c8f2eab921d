//! Feedback domain module.
//!
//! - `model`: `FeedbackReport`, `Scores` and transcript metrics
//! - `repair`: Coercion of raw model output into a bounded report

mod model;
pub mod repair;

pub use model::{
    FEEDBACK_ITEMS, FeedbackReport, MAX_SCORE, MIN_OVERALL_FEEDBACK_CHARS, MIN_SCORE, Scores,
    TranscriptMetrics, transcript_metrics,
};
pub use repair::repair_feedback;
