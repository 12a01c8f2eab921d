//! Candidate-facing interview text.

use super::templates::{self, INTRO};
use crate::error::Result;
use crate::persona::PersonaType;
use crate::role::Role;
use crate::session::InterviewMode;
use minijinja::context;

const TRANSITIONS: [&str; 5] = [
    "Great, let's move on to the next question.",
    "Thank you for that response. Let's continue.",
    "Excellent. Now, let's discuss another aspect.",
    "I appreciate your answer. Moving forward,",
    "That's helpful. Let's explore another area.",
];

/// Prefixes a question with its position and, for some personas, a hint.
///
/// The returned text always contains `question` verbatim.
pub fn format_question_with_context(
    question: &str,
    question_number: usize,
    total_questions: usize,
    persona: Option<PersonaType>,
) -> String {
    let mut formatted = format!("Question {question_number} of {total_questions}:\n\n{question}");
    match persona {
        Some(PersonaType::Confused) => formatted.push_str(
            "\n\n(Take your time to think through your answer. \
             Feel free to ask for clarification if needed.)",
        ),
        Some(PersonaType::Chatty) => formatted
            .push_str("\n\n(Please provide a focused response addressing the key points.)"),
        _ => {}
    }
    formatted
}

/// Picks a transition phrase deterministically from the question numbers.
pub fn transition_message(from_question: usize, to_question: usize) -> &'static str {
    TRANSITIONS[(from_question + to_question) % TRANSITIONS.len()]
}

pub fn completion_message() -> &'static str {
    "Thank you for completing the interview! \n\n\
     You've answered all the questions. I'll now generate detailed feedback on your \
     performance, including scores for communication, technical knowledge, and structure, \
     along with specific strengths and areas for improvement.\n\n\
     Please wait a moment while I prepare your feedback..."
}

/// Welcome text shown before the first question.
pub fn intro_message(role: &Role, mode: InterviewMode) -> Result<String> {
    templates::render(
        INTRO,
        context! { role => &role.display_name, mode => mode.as_str() },
    )
}

/// Prompt-side framing of interviewer text for a persona.
///
/// Unlike the classifier's adaptation this ignores confidence; it is used
/// when the persona is already known to apply.
pub fn adapt_for_persona(text: &str, persona: PersonaType) -> String {
    let (prefix, style, suffix) = match persona {
        PersonaType::Confused => (
            "I notice you might need some guidance. ",
            "Let me help clarify: ",
            " Take your time and feel free to ask if anything is unclear.",
        ),
        PersonaType::Chatty => (
            "Thank you for sharing. ",
            "Let's focus on the key point: ",
            " Please keep your response focused on this specific aspect.",
        ),
        PersonaType::EdgeCase => (
            "I understand your concern. ",
            "However, ",
            " Let's stay within the scope of the interview.",
        ),
        PersonaType::Efficient | PersonaType::Normal => return text.to_string(),
    };
    format!("{prefix}{style}{text}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_question_context_header() {
        let text = format_question_with_context("Tell me about yourself.", 1, 8, None);
        assert_eq!(text, "Question 1 of 8:\n\nTell me about yourself.");
    }

    #[test]
    fn test_question_context_always_contains_question() {
        let personas = [
            None,
            Some(PersonaType::Confused),
            Some(PersonaType::Efficient),
            Some(PersonaType::Chatty),
            Some(PersonaType::EdgeCase),
        ];
        for persona in personas {
            let text = format_question_with_context("How do you test code?", 3, 8, persona);
            assert!(text.contains("How do you test code?"));
        }
    }

    #[test]
    fn test_confused_question_gets_hint() {
        let text = format_question_with_context("Q", 2, 8, Some(PersonaType::Confused));
        assert!(text.ends_with("Feel free to ask for clarification if needed.)"));
    }

    #[test]
    fn test_transition_selection() {
        assert_eq!(transition_message(1, 2), TRANSITIONS[3]);
        assert_eq!(transition_message(2, 3), TRANSITIONS[0]);
        assert_eq!(transition_message(7, 8), TRANSITIONS[0]);
    }

    #[test]
    fn test_intro_mentions_role_and_mode() {
        let role = Role {
            name: "product_manager".into(),
            display_name: "Product Manager".into(),
            questions: vec![],
            evaluation_criteria: BTreeMap::new(),
        };
        let intro = intro_message(&role, InterviewMode::Voice).unwrap();
        assert!(intro.starts_with("Welcome to your Product Manager interview practice session!"));
        assert!(intro.contains("We'll be using voice mode"));
    }

    #[test]
    fn test_adapt_for_persona() {
        assert_eq!(adapt_for_persona("Q?", PersonaType::Normal), "Q?");
        assert_eq!(
            adapt_for_persona("Q?", PersonaType::EdgeCase),
            "I understand your concern. However, Q? Let's stay within the scope of the interview."
        );
    }
}
