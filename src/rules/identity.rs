//! The only stateful intents: remembering and recalling the user's name.

use crate::text::title_case;
use crate::{Rule, RuleTraits};

/// my name is <name> / i am <name>
///
/// The name is 2 to 40 letters or spaces and must run to the end of the
/// input; "i am 25" or "my name is r2d2" fall through to later rules.
pub fn rule_set_name() -> Rule {
    rule! {
        intent: "set_name",
        pattern: r"^(my name is|i am)\s+([a-zA-Z ]{2,40})$",
        traits: RuleTraits::STATEFUL,
        reply: |caps, turn| {
            let name = title_case(caps[2].trim());
            let reply = format!("Nice to meet you, {name}! Ask me: 'what is AI'.");
            turn.session.user_name = Some(name);
            reply
        }
    }
}

pub fn rule_ask_name() -> Rule {
    rule! {
        intent: "ask_name",
        pattern: r"^(what is my name|who am i)\b.*",
        reply: |_caps, turn| {
            match turn.session.user_name() {
                Some(name) => format!("Your name is {name} (as you told me)."),
                None => "I don't know your name yet. You can say: 'my name is ...'.".to_string(),
            }
        }
    }
}
