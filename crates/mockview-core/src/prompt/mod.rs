//! Prompt templates and interview text.
//!
//! Everything here is a deterministic string transformation with no side
//! effects. Templates are rendered with `minijinja`; interpolated values are
//! never re-parsed as template syntax.

mod builders;
mod messages;
mod templates;

pub use builders::{
    feedback_prompt, followup_analysis_prompt, format_evaluation_criteria, format_transcript,
    interviewer_system_prompt, persona_note,
};
pub use messages::{
    adapt_for_persona, completion_message, format_question_with_context, intro_message,
    transition_message,
};
