//! Persona domain model.
//!
//! A persona is the classifier's verdict on how a candidate is interacting
//! with the interview. It is recomputed for every answer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral archetypes recognised by the classifier.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PersonaType {
    /// Short, uncertain answers and questions back to the interviewer
    Confused,
    /// Concise answers and requests to move faster
    Efficient,
    /// Long answers with tangents and anecdotes
    Chatty,
    /// Invalid, spammy or out-of-scope input
    EdgeCase,
    /// Nothing stands out
    Normal,
}

impl PersonaType {
    /// Returns the wire name (`confused`, `edge_case`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaType::Confused => "confused",
            PersonaType::Efficient => "efficient",
            PersonaType::Chatty => "chatty",
            PersonaType::EdgeCase => "edge_case",
            PersonaType::Normal => "normal",
        }
    }
}

impl Default for PersonaType {
    fn default() -> Self {
        PersonaType::Normal
    }
}

impl fmt::Display for PersonaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification verdict with its justification.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Persona {
    /// Detected archetype
    #[serde(rename = "type")]
    pub persona_type: PersonaType,
    /// Confidence in `[0.0, 1.0]`, rounded to two decimals
    pub confidence: f64,
    /// Human-readable tags explaining the verdict
    pub indicators: Vec<String>,
}

/// Confidence assigned when no archetype stands out.
pub const NORMAL_CONFIDENCE: f64 = 0.8;

impl Persona {
    /// Creates a verdict, clamping and rounding the confidence.
    ///
    /// An empty indicator list is replaced by `["none"]`.
    pub fn new(persona_type: PersonaType, confidence: f64, indicators: Vec<String>) -> Self {
        let indicators = if indicators.is_empty() {
            vec!["none".to_string()]
        } else {
            indicators
        };
        Self {
            persona_type,
            confidence: round2(confidence.clamp(0.0, 1.0)),
            indicators,
        }
    }

    /// The placeholder verdict a new session starts with.
    pub fn initial() -> Self {
        Self::new(
            PersonaType::Normal,
            NORMAL_CONFIDENCE,
            vec!["initial_state".to_string()],
        )
    }

    /// The fallback verdict when every archetype scores low.
    pub fn normal() -> Self {
        Self::new(
            PersonaType::Normal,
            NORMAL_CONFIDENCE,
            vec!["standard_interaction_pattern".to_string()],
        )
    }

    pub fn is_normal(&self) -> bool {
        self.persona_type == PersonaType::Normal
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::initial()
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
