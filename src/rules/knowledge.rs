//! Intents answered from the knowledge base.

use crate::{Rule, RuleTraits};

/// what is <topic> / define <topic>
///
/// Both forms are looked up as `"what is <topic>"`, so a single key answers
/// "define machine learning" and "what is machine learning".
pub fn rule_what_is() -> Rule {
    rule! {
        intent: "kb_what_is",
        pattern: r"^(what is|define)\s+(.+)$",
        traits: RuleTraits::KNOWLEDGE,
        reply: |caps, turn| {
            let topic = caps[2].trim();
            match turn.consult(&format!("what is {topic}")) {
                Some(answer) => answer,
                None => format!(
                    "I don't have '{topic}' in my knowledge base yet.\n\
                     Try: 'what is AI', 'what is NLP', or type 'help'."
                ),
            }
        }
    }
}

/// Catch-all: the whole normalized input is the query.
pub fn rule_direct() -> Rule {
    rule! {
        intent: "kb_direct",
        pattern: r"^(.+)$",
        traits: RuleTraits::KNOWLEDGE | RuleTraits::CATCH_ALL,
        reply: |caps, turn| {
            match turn.consult(caps[1].trim()) {
                Some(answer) => answer,
                None => NOT_SURE.to_string(),
            }
        }
    }
}

pub(crate) const NOT_SURE: &str = "I’m not sure about that.\n\
Try:\n\
- 'what is AI'\n\
- 'define machine learning'\n\
- 'help'\n";
