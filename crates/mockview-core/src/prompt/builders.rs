//! Prompts sent to the language model.

use super::templates::{self, FEEDBACK_GENERATION, FOLLOWUP_ANALYSIS, INTERVIEWER_SYSTEM};
use crate::error::Result;
use crate::persona::PersonaType;
use crate::role::{Role, display_name_from_key};
use crate::session::{Message, MessageType};
use minijinja::context;
use serde_json::Value;
use std::collections::BTreeMap;

/// Builds the interviewer's system prompt.
///
/// A behavioral note is appended for every persona except `Normal`.
pub fn interviewer_system_prompt(
    role: &Role,
    question: &str,
    persona: Option<PersonaType>,
) -> Result<String> {
    let mut prompt = templates::render(
        INTERVIEWER_SYSTEM,
        context! { role => &role.display_name, question => question },
    )?;
    if let Some(note) = persona.and_then(persona_note) {
        prompt.push_str("\n\n");
        prompt.push_str(note);
    }
    Ok(prompt)
}

/// Builds the completeness-analysis prompt for one answer.
///
/// The model is instructed to reply with the literal `COMPLETE` or a single
/// follow-up question.
pub fn followup_analysis_prompt(role: &Role, question: &str, answer: &str) -> Result<String> {
    templates::render(
        FOLLOWUP_ANALYSIS,
        context! { role => &role.display_name, question => question, answer => answer },
    )
}

/// Builds the feedback prompt from the transcript and the role's criteria.
pub fn feedback_prompt(role: &Role, transcript: &[Message]) -> Result<String> {
    templates::render(
        FEEDBACK_GENERATION,
        context! {
            role => &role.display_name,
            transcript => format_transcript(transcript),
            criteria => format_evaluation_criteria(&role.evaluation_criteria),
        },
    )
}

/// Renders messages as `Interviewer:` / `Candidate:` lines.
pub fn format_transcript(transcript: &[Message]) -> String {
    transcript
        .iter()
        .map(|message| match message.message_type() {
            MessageType::Question | MessageType::Followup => {
                format!("\nInterviewer: {}", message.content())
            }
            MessageType::Answer => format!("Candidate: {}", message.content()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flattens evaluation criteria into readable bullet text.
pub fn format_evaluation_criteria(criteria: &BTreeMap<String, Value>) -> String {
    let mut lines = Vec::new();
    for (category, details) in criteria {
        lines.push(format!("\n{}:", display_name_from_key(category)));
        match details {
            Value::Object(map) => {
                for (key, value) in map {
                    lines.push(format!("  - {key}: {}", plain_text(value)));
                }
            }
            Value::Array(items) => {
                for item in items {
                    lines.push(format!("  - {}", plain_text(item)));
                }
            }
            other => lines.push(format!("  {}", plain_text(other))),
        }
    }
    lines.join("\n")
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// System-prompt note describing how to treat a persona.
pub fn persona_note(persona: PersonaType) -> Option<&'static str> {
    match persona {
        PersonaType::Normal => None,
        PersonaType::Confused => Some(
            "Note: The candidate seems uncertain or confused. \
             Provide extra guidance, break down complex questions, \
             and offer examples to help them understand what you're looking for.",
        ),
        PersonaType::Efficient => Some(
            "Note: The candidate prefers efficient, direct communication. \
             Be concise, skip unnecessary pleasantries, and focus on core questions.",
        ),
        PersonaType::Chatty => Some(
            "Note: The candidate tends to provide lengthy or off-topic responses. \
             Politely redirect them to stay focused on the question at hand. \
             Acknowledge their enthusiasm while guiding them back on track.",
        ),
        PersonaType::EdgeCase => Some(
            "Note: The candidate may provide unusual inputs or requests. \
             Set clear boundaries, explain what's within scope, \
             and guide them back to the interview format.",
        ),
    }
}
