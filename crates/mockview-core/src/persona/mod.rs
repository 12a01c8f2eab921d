//! Persona detection module.
//!
//! # Module Structure
//!
//! - `model`: The verdict types (`Persona`, `PersonaType`)
//! - `rules`: Table-driven scoring rules per archetype
//! - `classifier`: Selection between archetypes and persona-aware text shaping

mod classifier;
mod model;
pub mod rules;

pub use classifier::{
    ADAPT_THRESHOLD, CONSISTENCY_BONUS, EDGE_CASE_OVERRIDE, GUIDANCE_THRESHOLD,
    MIN_PERSONA_CONFIDENCE, PersonaClassifier,
};
pub use model::{NORMAL_CONFIDENCE, Persona, PersonaType};
pub(crate) use model::round2;
