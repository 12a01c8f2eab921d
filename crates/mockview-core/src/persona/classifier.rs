//! Persona classification and persona-aware response shaping.

use super::model::{Persona, PersonaType};
use super::rules::{
    AnswerSignals, CHATTY_RULES, CONFUSED_RULES, EDGE_CASE_RULES, EFFICIENT_RULES, RuleScore,
};
use crate::session::Message;

/// Edge-case confidence at which it overrides every other archetype.
pub const EDGE_CASE_OVERRIDE: f64 = 0.4;
/// Below this top score the answer is classified as normal.
pub const MIN_PERSONA_CONFIDENCE: f64 = 0.3;
/// Multiplier applied to the previous verdict's archetype.
pub const CONSISTENCY_BONUS: f64 = 1.2;
/// Minimum confidence for [`PersonaClassifier::adapt_response`] to reshape text.
pub const ADAPT_THRESHOLD: f64 = 0.4;
/// Minimum confidence for guidance and the `should_*` helpers.
pub const GUIDANCE_THRESHOLD: f64 = 0.5;

const PLEASANTRIES: &[&str] = &[
    "Thank you for that response. ",
    "I appreciate your answer. ",
    "That's great. ",
    "Excellent. ",
];

/// Classifies answers into personas and adapts interviewer text to them.
///
/// The classifier is stateless; the only carried-over state is the previous
/// verdict's type, which callers pass back in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaClassifier;

impl PersonaClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies an answer.
    ///
    /// # Arguments
    ///
    /// * `answer` - The raw answer text
    /// * `history` - The session's messages, oldest first; only the trailing
    ///   window is inspected
    /// * `previous` - The previous verdict's type, used as a consistency bias
    ///
    /// # Returns
    ///
    /// The verdict. The same inputs always yield the same verdict.
    pub fn classify(
        &self,
        answer: &str,
        history: &[Message],
        previous: Option<PersonaType>,
    ) -> Persona {
        let signals = AnswerSignals::extract(answer, history);

        let edge = EDGE_CASE_RULES.score(&signals);
        if edge.confidence >= EDGE_CASE_OVERRIDE {
            return Persona::new(PersonaType::EdgeCase, edge.confidence, edge.indicators);
        }

        // Order breaks ties: the first maximum wins.
        let mut candidates: [(PersonaType, RuleScore); 3] = [
            (PersonaType::Confused, CONFUSED_RULES.score(&signals)),
            (PersonaType::Chatty, CHATTY_RULES.score(&signals)),
            (PersonaType::Efficient, EFFICIENT_RULES.score(&signals)),
        ];

        let top = candidates
            .iter()
            .map(|(_, score)| score.confidence)
            .fold(0.0, f64::max);
        if top < MIN_PERSONA_CONFIDENCE {
            return Persona::normal();
        }

        if let Some(previous) = previous {
            if let Some((_, score)) = candidates.iter_mut().find(|(kind, _)| *kind == previous) {
                score.confidence = f64::min(score.confidence * CONSISTENCY_BONUS, 1.0);
            }
        }

        let mut best = 0;
        for (index, (_, score)) in candidates.iter().enumerate() {
            if score.confidence > candidates[best].1.confidence {
                best = index;
            }
        }
        let (persona_type, score) = candidates[best].clone();
        Persona::new(persona_type, score.confidence, score.indicators)
    }

    /// Wraps interviewer text with persona-specific framing.
    ///
    /// Returns the text unchanged for normal personas or when confidence is
    /// below [`ADAPT_THRESHOLD`].
    pub fn adapt_response(&self, text: &str, persona: &Persona) -> String {
        if persona.confidence < ADAPT_THRESHOLD {
            return text.to_string();
        }
        match persona.persona_type {
            PersonaType::Normal => text.to_string(),
            PersonaType::Confused => format!(
                "I notice you might need some guidance. {text} \
                 Take your time and feel free to ask if anything is unclear."
            ),
            PersonaType::Efficient => {
                let mut stripped = text.to_string();
                for pleasantry in PLEASANTRIES {
                    stripped = stripped.replace(pleasantry, "");
                }
                stripped.trim().to_string()
            }
            PersonaType::Chatty => format!(
                "Thank you for sharing. Let's focus on the key point: {text} \
                 Please keep your response focused on this specific aspect."
            ),
            PersonaType::EdgeCase => format!(
                "I understand your concern. However, {text} \
                 Let's stay within the scope of the interview. \
                 Please provide a relevant answer to the question."
            ),
        }
    }

    /// Returns advisory text to surface proactively, if any.
    pub fn get_persona_guidance(&self, persona: &Persona) -> Option<&'static str> {
        if persona.confidence < GUIDANCE_THRESHOLD {
            return None;
        }
        match persona.persona_type {
            PersonaType::Normal => None,
            PersonaType::Confused => Some(
                "I'm here to help! If any question is unclear, feel free to ask for \
                 clarification or examples. Take your time with your answers.",
            ),
            PersonaType::Efficient => Some(
                "I appreciate your direct communication style. I'll keep my questions \
                 focused and move efficiently through the interview.",
            ),
            PersonaType::Chatty => Some(
                "I appreciate your enthusiasm! To make the best use of our time, \
                 please try to keep your answers focused on the specific question asked.",
            ),
            PersonaType::EdgeCase => Some(
                "Please provide relevant answers to the interview questions. \
                 If you have concerns about the interview format, let me know, \
                 but let's stay focused on the interview content.",
            ),
        }
    }

    pub fn should_provide_extra_guidance(&self, persona: &Persona) -> bool {
        persona.persona_type == PersonaType::Confused && persona.confidence >= GUIDANCE_THRESHOLD
    }

    pub fn should_skip_pleasantries(&self, persona: &Persona) -> bool {
        persona.persona_type == PersonaType::Efficient && persona.confidence >= GUIDANCE_THRESHOLD
    }

    pub fn should_redirect_focus(&self, persona: &Persona) -> bool {
        persona.persona_type == PersonaType::Chatty && persona.confidence >= GUIDANCE_THRESHOLD
    }
}
