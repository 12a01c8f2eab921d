//! Table-driven persona scoring rules.
//!
//! Each archetype is described by a [`RuleSet`]: an ordered list of
//! [`PersonaRule`]s. A rule inspects the precomputed [`AnswerSignals`] and,
//! when it fires, contributes a confidence delta and an indicator tag. The
//! set's confidence is the sum of fired deltas, capped at 1.0.

use super::model::PersonaType;
use crate::session::{Message, MessageType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Answers under this many words count as short.
pub const SHORT_ANSWER_WORDS: usize = 30;
/// Upper bound (inclusive) of a concise answer.
pub const CONCISE_ANSWER_WORDS: usize = 50;
/// Answers over this many words count as long.
pub const LONG_ANSWER_WORDS: usize = 200;
/// Number of trailing history messages inspected for patterns.
pub const HISTORY_WINDOW: usize = 6;

const CONFUSION_PHRASES: &[&str] = &[
    "what do you mean",
    "i don't understand",
    "can you explain",
    "i'm not sure",
    "i don't know",
    "could you clarify",
    "what does that mean",
    "i'm confused",
    "?",
];

const EFFICIENCY_PHRASES: &[&str] = &[
    "let's move on",
    "next question",
    "skip",
    "keep it brief",
    "quickly",
    "short answer",
    "be direct",
    "get to the point",
];

const OFF_TOPIC_PHRASES: &[&str] = &[
    "by the way",
    "speaking of",
    "that reminds me",
    "on a different note",
    "another thing",
    "let me tell you about",
    "i remember when",
    "on another note",
    "this reminds me",
];

const SUSPICIOUS_PHRASES: &[&str] = &[
    "hack",
    "cheat",
    "skip all",
    "give me answers",
    "what's the password",
    "admin",
    "bypass",
    "tell me the questions",
    "show me feedback now",
    "give me the answer",
    "just give me",
];

const FILLER_WORDS: &[&str] = &["um", "uh", "like", "you know", "basically", "actually"];

const STORY_PHRASES: &[&str] = &["i remember", "one time", "there was", "let me tell you"];

static ONLY_SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^a-zA-Z0-9\s]{10,}$").expect("special character pattern is valid")
});

static ONLY_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{50,}$").expect("digit pattern is valid"));

/// Minimum number of repeats after the first character for spam detection.
const REPEATED_CHAR_RUN: usize = 20;

/// Features of one answer, computed once and shared by every rule.
#[derive(Debug, Clone)]
pub struct AnswerSignals<'a> {
    /// The answer exactly as submitted
    pub raw: &'a str,
    /// Lowercased, trimmed answer used for phrase matching
    pub lower: String,
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Word counts of answer messages within the history window
    pub recent_answer_word_counts: Vec<usize>,
}

impl<'a> AnswerSignals<'a> {
    /// Extracts signals from an answer and the session history.
    ///
    /// Only the last [`HISTORY_WINDOW`] messages are considered, and of those
    /// only the answers.
    pub fn extract(raw: &'a str, history: &[Message]) -> Self {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let recent_answer_word_counts = history[start..]
            .iter()
            .filter(|message| message.message_type() == MessageType::Answer)
            .map(Message::word_count)
            .collect();

        Self {
            raw,
            lower: raw.trim().to_lowercase(),
            word_count: raw.split_whitespace().count(),
            recent_answer_word_counts,
        }
    }

    fn matched<'p>(&self, lexicon: &[&'p str]) -> Vec<&'p str> {
        lexicon
            .iter()
            .copied()
            .filter(|phrase| self.lower.contains(phrase))
            .collect()
    }

    /// Whether at least two recent answers exist and at least two satisfy `predicate`.
    fn history_pattern(&self, predicate: impl Fn(usize) -> bool) -> bool {
        self.recent_answer_word_counts.len() >= 2
            && self
                .recent_answer_word_counts
                .iter()
                .filter(|count| predicate(**count))
                .count()
                >= 2
    }
}

/// Contribution of a fired rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHit {
    pub delta: f64,
    pub indicator: String,
}

impl RuleHit {
    fn new(delta: f64, indicator: impl Into<String>) -> Option<Self> {
        Some(Self {
            delta,
            indicator: indicator.into(),
        })
    }
}

/// A single scoring rule: returns a hit when its predicate holds.
#[derive(Clone, Copy)]
pub struct PersonaRule {
    /// Stable rule name
    pub name: &'static str,
    pub evaluate: fn(&AnswerSignals<'_>) -> Option<RuleHit>,
}

impl std::fmt::Debug for PersonaRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonaRule").field("name", &self.name).finish()
    }
}

/// Aggregated result of a rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScore {
    pub confidence: f64,
    pub indicators: Vec<String>,
}

/// The ordered rules for one archetype.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub persona_type: PersonaType,
    pub rules: &'static [PersonaRule],
}

impl RuleSet {
    /// Evaluates every rule in order and sums the fired deltas (capped at 1.0).
    pub fn score(&self, signals: &AnswerSignals<'_>) -> RuleScore {
        let mut confidence = 0.0;
        let mut indicators = Vec::new();
        for rule in self.rules {
            if let Some(hit) = (rule.evaluate)(signals) {
                confidence += hit.delta;
                indicators.push(hit.indicator);
            }
        }
        RuleScore {
            confidence: f64::min(confidence, 1.0),
            indicators,
        }
    }
}

fn first_two(phrases: &[&str]) -> String {
    phrases.iter().take(2).copied().collect::<Vec<_>>().join(", ")
}

// ============================================================================
// Edge case
// ============================================================================

fn suspicious_requests(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let matched = s.matched(SUSPICIOUS_PHRASES);
    if matched.is_empty() {
        return None;
    }
    RuleHit::new(0.5, format!("suspicious_requests: {}", first_two(&matched)))
}

/// A character followed by at least [`REPEATED_CHAR_RUN`] copies of itself.
fn is_repeated_char_spam(raw: &str) -> bool {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first == '\n' {
        return false;
    }
    let mut repeats = 0;
    for c in chars {
        if c != first {
            return false;
        }
        repeats += 1;
    }
    repeats >= REPEATED_CHAR_RUN
}

fn invalid_input_pattern(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    // A single trailing newline still counts as end of input.
    let body = s.raw.strip_suffix('\n').unwrap_or(s.raw);
    let invalid = ONLY_SPECIAL_CHARS.is_match(body)
        || is_repeated_char_spam(body)
        || ONLY_DIGITS.is_match(body);
    invalid.then(|| RuleHit::new(0.6, "invalid_input_pattern")).flatten()
}

fn empty_input(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    s.raw
        .trim()
        .is_empty()
        .then(|| RuleHit::new(0.8, "empty_input"))
        .flatten()
}

fn too_short(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    (s.raw.trim().chars().count() < 3)
        .then(|| RuleHit::new(0.5, "too_short"))
        .flatten()
}

fn repetitive_spam(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let words: Vec<&str> = s.lower.split_whitespace().collect();
    if words.len() <= 5 {
        return None;
    }
    let unique: HashSet<&str> = words.iter().copied().collect();
    let ratio = unique.len() as f64 / words.len() as f64;
    (ratio < 0.3)
        .then(|| RuleHit::new(0.4, "repetitive_spam"))
        .flatten()
}

pub static EDGE_CASE_RULES: RuleSet = RuleSet {
    persona_type: PersonaType::EdgeCase,
    rules: &[
        PersonaRule {
            name: "suspicious_requests",
            evaluate: suspicious_requests,
        },
        PersonaRule {
            name: "invalid_input_pattern",
            evaluate: invalid_input_pattern,
        },
        PersonaRule {
            name: "empty_input",
            evaluate: empty_input,
        },
        PersonaRule {
            name: "too_short",
            evaluate: too_short,
        },
        PersonaRule {
            name: "repetitive_spam",
            evaluate: repetitive_spam,
        },
    ],
};

// ============================================================================
// Confused
// ============================================================================

fn short_answer(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    (s.word_count < SHORT_ANSWER_WORDS)
        .then(|| RuleHit::new(0.3, "short_answer"))
        .flatten()
}

fn asking_questions(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let count = s.raw.matches('?').count();
    if count == 0 {
        return None;
    }
    RuleHit::new(
        0.2 * count.min(3) as f64,
        format!("asking_questions ({count})"),
    )
}

fn uncertainty_phrases(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let matched = s.matched(CONFUSION_PHRASES);
    if matched.is_empty() {
        return None;
    }
    RuleHit::new(
        0.3 * matched.len().min(2) as f64,
        format!("uncertainty_phrases: {}", first_two(&matched)),
    )
}

fn pattern_of_short_answers(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    s.history_pattern(|words| words < SHORT_ANSWER_WORDS)
        .then(|| RuleHit::new(0.2, "pattern_of_short_answers"))
        .flatten()
}

pub static CONFUSED_RULES: RuleSet = RuleSet {
    persona_type: PersonaType::Confused,
    rules: &[
        PersonaRule {
            name: "short_answer",
            evaluate: short_answer,
        },
        PersonaRule {
            name: "asking_questions",
            evaluate: asking_questions,
        },
        PersonaRule {
            name: "uncertainty_phrases",
            evaluate: uncertainty_phrases,
        },
        PersonaRule {
            name: "pattern_of_short_answers",
            evaluate: pattern_of_short_answers,
        },
    ],
};

// ============================================================================
// Efficient
// ============================================================================

fn is_concise(words: usize) -> bool {
    (SHORT_ANSWER_WORDS..=CONCISE_ANSWER_WORDS).contains(&words)
}

fn efficiency_requests(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let matched = s.matched(EFFICIENCY_PHRASES);
    if matched.is_empty() {
        return None;
    }
    RuleHit::new(0.4, format!("efficiency_requests: {}", first_two(&matched)))
}

fn concise_answer(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    is_concise(s.word_count)
        .then(|| RuleHit::new(0.3, "concise_answer"))
        .flatten()
}

fn consistent_brevity(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    s.history_pattern(is_concise)
        .then(|| RuleHit::new(0.3, "consistent_brevity"))
        .flatten()
}

fn direct_communication(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let has_filler = FILLER_WORDS.iter().any(|filler| s.lower.contains(filler));
    (!has_filler && s.word_count >= 20)
        .then(|| RuleHit::new(0.2, "direct_communication"))
        .flatten()
}

pub static EFFICIENT_RULES: RuleSet = RuleSet {
    persona_type: PersonaType::Efficient,
    rules: &[
        PersonaRule {
            name: "efficiency_requests",
            evaluate: efficiency_requests,
        },
        PersonaRule {
            name: "concise_answer",
            evaluate: concise_answer,
        },
        PersonaRule {
            name: "consistent_brevity",
            evaluate: consistent_brevity,
        },
        PersonaRule {
            name: "direct_communication",
            evaluate: direct_communication,
        },
    ],
};

// ============================================================================
// Chatty
// ============================================================================

fn long_answer(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    if s.word_count <= LONG_ANSWER_WORDS {
        return None;
    }
    let excess = (s.word_count - LONG_ANSWER_WORDS) as f64;
    RuleHit::new(
        0.3 + f64::min(excess / 200.0, 0.3),
        format!("long_answer ({} words)", s.word_count),
    )
}

fn tangential_content(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let matched = s.matched(OFF_TOPIC_PHRASES);
    if matched.is_empty() {
        return None;
    }
    RuleHit::new(
        0.3 * matched.len().min(2) as f64,
        format!("tangential_content: {}", first_two(&matched)),
    )
}

fn excessive_elaboration(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    let sentences = s
        .raw
        .split(['.', '!', '?'])
        .filter(|sentence| !sentence.trim().is_empty())
        .count();
    (sentences > 10)
        .then(|| RuleHit::new(0.2, format!("excessive_elaboration ({sentences} sentences)")))
        .flatten()
}

fn storytelling_pattern(s: &AnswerSignals<'_>) -> Option<RuleHit> {
    STORY_PHRASES
        .iter()
        .any(|phrase| s.lower.contains(phrase))
        .then(|| RuleHit::new(0.2, "storytelling_pattern"))
        .flatten()
}

pub static CHATTY_RULES: RuleSet = RuleSet {
    persona_type: PersonaType::Chatty,
    rules: &[
        PersonaRule {
            name: "long_answer",
            evaluate: long_answer,
        },
        PersonaRule {
            name: "tangential_content",
            evaluate: tangential_content,
        },
        PersonaRule {
            name: "excessive_elaboration",
            evaluate: excessive_elaboration,
        },
        PersonaRule {
            name: "storytelling_pattern",
            evaluate: storytelling_pattern,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(text: &str) -> AnswerSignals<'_> {
        AnswerSignals::extract(text, &[])
    }

    #[test]
    fn test_repeated_char_spam_needs_twenty_repeats() {
        assert!(is_repeated_char_spam(&"a".repeat(21)));
        assert!(!is_repeated_char_spam(&"a".repeat(20)));
        assert!(!is_repeated_char_spam("aaaaaaaaaaaaaaaaaaaaaaab"));
    }

    #[test]
    fn test_single_trailing_newline_still_matches_patterns() {
        for raw in [
            format!("{}\n", "a".repeat(21)),
            format!("{}\n", "#".repeat(12)),
            format!("{}\n", "7".repeat(50)),
        ] {
            let s = AnswerSignals::extract(&raw, &[]);
            assert!(invalid_input_pattern(&s).is_some(), "{raw:?}");
        }
        let twice = format!("{}\n\n", "a".repeat(21));
        assert!(invalid_input_pattern(&AnswerSignals::extract(&twice, &[])).is_none());
    }

    #[test]
    fn test_special_characters_trigger_invalid_pattern() {
        let score = EDGE_CASE_RULES.score(&signals("!@#$%^&*()_+"));
        assert!(score.indicators.contains(&"invalid_input_pattern".to_string()));
        assert!(score.confidence >= 0.6);
    }

    #[test]
    fn test_invalid_pattern_counts_once() {
        // Matches both the repeated-char and digit-only checks.
        let score = EDGE_CASE_RULES.score(&signals(&"1".repeat(60)));
        let hits = score
            .indicators
            .iter()
            .filter(|tag| *tag == "invalid_input_pattern")
            .count();
        assert_eq!(hits, 1);
        assert_eq!(score.confidence, 0.6);
    }

    #[test]
    fn test_empty_input_is_capped() {
        let score = EDGE_CASE_RULES.score(&signals("   "));
        assert_eq!(score.confidence, 1.0);
        assert!(score.indicators.contains(&"empty_input".to_string()));
        assert!(score.indicators.contains(&"too_short".to_string()));
    }

    #[test]
    fn test_repetitive_spam() {
        let score = EDGE_CASE_RULES.score(&signals("yes yes yes yes yes yes yes yes yes yes"));
        assert!(score.indicators.contains(&"repetitive_spam".to_string()));
    }

    #[test]
    fn test_uncertainty_phrases_list_first_two() {
        let score = CONFUSED_RULES.score(&signals("I don't know. What do you mean?"));
        assert!(score
            .indicators
            .contains(&"uncertainty_phrases: what do you mean, i don't know".to_string()));
        assert!(score.indicators.contains(&"asking_questions (1)".to_string()));
        assert!(score.indicators.contains(&"short_answer".to_string()));
    }

    #[test]
    fn test_long_answer_scales_with_excess() {
        let text = "word ".repeat(300);
        let score = CHATTY_RULES.score(&signals(&text));
        assert!(score.indicators.contains(&"long_answer (300 words)".to_string()));
        assert!((score.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_filler_words_disable_direct_communication() {
        let text = "um I basically built the service and then deployed it to production with a \
                    blue green rollout and monitoring in place";
        let score = EFFICIENT_RULES.score(&signals(text));
        assert!(!score.indicators.contains(&"direct_communication".to_string()));
    }

    #[test]
    fn test_history_pattern_requires_two_answers() {
        let history = vec![Message::answer("short").unwrap()];
        let s = AnswerSignals::extract("short again", &history);
        assert!(pattern_of_short_answers(&s).is_none());

        let history = vec![
            Message::answer("short").unwrap(),
            Message::question("Next?").unwrap(),
            Message::answer("also short").unwrap(),
        ];
        let s = AnswerSignals::extract("short again", &history);
        assert!(pattern_of_short_answers(&s).is_some());
    }

    #[test]
    fn test_history_window_ignores_old_messages() {
        let mut history = vec![
            Message::answer("old short").unwrap(),
            Message::answer("old short two").unwrap(),
        ];
        for _ in 0..HISTORY_WINDOW {
            history.push(Message::question("Tell me more about your experience.").unwrap());
        }
        let s = AnswerSignals::extract("fine", &history);
        assert!(s.recent_answer_word_counts.is_empty());
    }
}
