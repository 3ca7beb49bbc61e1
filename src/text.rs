//! Text normalization shared by the dispatcher and the knowledge lookup.
//!
//! Every pattern is matched against `normalize(input)`, never the raw text, and
//! knowledge keys are stored in the same normalized form so both sides agree.

/// Trim, lowercase and collapse every whitespace run to a single space.
///
/// ```
/// assert_eq!(rulebot::normalize("  What   IS\tAI? "), "what is ai?");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word.to_lowercase());
    }
    out
}

/// Drop everything except `a-z`, `0-9` and spaces, then trim.
///
/// Spaces left doubled by the removal are kept; keys are compared verbatim.
pub fn loosen(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
