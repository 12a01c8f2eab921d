//! Interpretation of the completeness-analysis reply.
//!
//! The model answers either with the literal `COMPLETE` or with a single
//! follow-up question. Replies are read in one pass: marker lines are
//! dropped and whatever remains is the follow-up.

/// Replies shorter than this are treated as degenerate.
pub const MIN_FOLLOWUP_CHARS: usize = 10;

const COMPLETE_MARKER: &str = "COMPLETE";

/// Extracts a follow-up question from the model's reply.
///
/// # Returns
///
/// - `None` if the reply only says the answer is complete, or if what is left
///   after removing marker lines is shorter than [`MIN_FOLLOWUP_CHARS`]
/// - `Some(question)` otherwise
pub fn parse_followup_reply(reply: &str) -> Option<String> {
    let remainder = reply
        .lines()
        .filter(|line| !line.trim().is_empty() && !is_marker_line(line))
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let remainder = remainder.trim();

    if remainder.chars().count() < MIN_FOLLOWUP_CHARS {
        return None;
    }
    Some(remainder.to_string())
}

/// A line carrying the completion verdict: the upper-case marker as a whole
/// word anywhere (`Answer: COMPLETE`), or the bare word in any case.
fn is_marker_line(line: &str) -> bool {
    let trimmed = line.trim();
    if contains_marker_word(trimmed) {
        return true;
    }
    let bare = trimmed.trim_matches(|c: char| !c.is_alphanumeric());
    bare.eq_ignore_ascii_case(COMPLETE_MARKER)
}

fn contains_marker_word(line: &str) -> bool {
    line.match_indices(COMPLETE_MARKER).any(|(start, marker)| {
        let before = line[..start].chars().next_back();
        let after = line[start + marker.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
