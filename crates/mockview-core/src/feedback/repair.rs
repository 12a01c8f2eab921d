//! Turning a model's JSON reply into a valid [`FeedbackReport`].
//!
//! Repair is preferred over rejection: only a missing or non-numeric score
//! is fatal. Everything else is clamped, trimmed, padded or replaced.

use super::model::{
    FEEDBACK_ITEMS, FeedbackReport, MAX_SCORE, MIN_OVERALL_FEEDBACK_CHARS, MIN_SCORE, Scores,
};
use crate::error::{InterviewError, Result};
use serde_json::Value;

const STRENGTH_FALLBACK: &str = "Strong performance demonstrated";
const IMPROVEMENT_FALLBACK: &str = "Continue practicing to refine your skills";

/// Builds a report from raw model output.
///
/// # Errors
///
/// Returns `FeedbackValidation` if any of the three scores is missing or
/// cannot be read as a number.
pub fn repair_feedback(session_id: &str, raw: &Value) -> Result<FeedbackReport> {
    let scores_value = raw.get("scores").unwrap_or(&Value::Null);
    let scores = Scores {
        communication: coerce_score(scores_value.get("communication"), "communication")?,
        technical_knowledge: coerce_score(
            scores_value.get("technical_knowledge"),
            "technical_knowledge",
        )?,
        structure: coerce_score(scores_value.get("structure"), "structure")?,
    };

    let strengths = ensure_three_items(raw.get("strengths"), "strength", STRENGTH_FALLBACK);
    let improvements =
        ensure_three_items(raw.get("improvements"), "improvement", IMPROVEMENT_FALLBACK);

    let overall_feedback = match raw.get("overall_feedback").and_then(Value::as_str) {
        Some(text) if text.trim().chars().count() >= MIN_OVERALL_FEEDBACK_CHARS => {
            text.trim().to_string()
        }
        _ => fallback_overall_feedback(&scores),
    };

    Ok(FeedbackReport {
        session_id: session_id.to_string(),
        scores,
        strengths,
        improvements,
        overall_feedback,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Reads a score as an integer (truncating fractions) and clamps it to `[1, 5]`.
pub fn coerce_score(value: Option<&Value>, name: &str) -> Result<u8> {
    let number = match value {
        None | Some(Value::Null) => {
            return Err(InterviewError::feedback_validation(format!(
                "Missing {name} score"
            )));
        }
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        Some(_) => None,
    };
    let Some(number) = number else {
        return Err(InterviewError::feedback_validation(format!(
            "{name} score must be a number, got {}",
            value.map(Value::to_string).unwrap_or_default()
        )));
    };
    Ok(number.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8)
}

/// Normalizes a list field to exactly three non-empty strings.
///
/// A bare string counts as a one-item list; any other non-list value and any
/// non-string or blank entry is dropped before padding.
pub fn ensure_three_items(value: Option<&Value>, item_type: &str, fallback: &str) -> Vec<String> {
    let mut items: Vec<String> = match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(single)) if !single.trim().is_empty() => {
            vec![single.trim().to_string()]
        }
        _ => Vec::new(),
    };
    items.truncate(FEEDBACK_ITEMS);
    while items.len() < FEEDBACK_ITEMS {
        items.push(format!("{fallback} ({item_type} {})", items.len() + 1));
    }
    items
}

/// Summary text chosen by the score average.
pub fn fallback_overall_feedback(scores: &Scores) -> String {
    let average = scores.average();
    if average >= 4.0 {
        format!(
            "Excellent performance overall with an average score of {average:.1}/5. \
             You demonstrated strong communication skills, solid technical knowledge, \
             and well-structured responses. Keep up the great work!"
        )
    } else if average >= 3.0 {
        format!(
            "Good performance with an average score of {average:.1}/5. \
             You showed adequate skills across all areas with room for improvement. \
             Focus on the specific areas mentioned to enhance your interview performance."
        )
    } else {
        format!(
            "Your performance shows potential with an average score of {average:.1}/5. \
             There are several areas that need improvement. Review the feedback carefully \
             and practice addressing the specific points mentioned to strengthen your skills."
        )
    }
}
