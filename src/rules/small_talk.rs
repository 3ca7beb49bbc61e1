//! Fixed-phrase intents: greetings, help, small talk, time and farewell.

use crate::api::format_timestamp;
use crate::{Rule, RuleTraits};

pub(crate) const HELP_TEXT: &str = "Here are some things you can try:\n\
- Say: hi / hello\n\
- Tell me your name: 'my name is Ammar'\n\
- Ask: 'what is AI' or 'define machine learning'\n\
- Ask: 'how to submit task'\n\
- Type: time\n\
- Type: exit\n";

/// hi / hello / hey / salam ...
pub fn rule_greeting() -> Rule {
    rule! {
        intent: "greeting",
        pattern: r"^(hi|hello|hey|assalamualaikum|salam)\b.*",
        reply: |_caps, turn| {
            match turn.session.user_name() {
                Some(name) => format!("Hello, {name}! How can I help you today?"),
                None => "Hello! I’m a simple rule-based chatbot. Type 'help' to see what I can do.".to_string(),
            }
        }
    }
}

pub fn rule_help() -> Rule {
    rule! {
        intent: "help",
        pattern: r"^(help|how to use|commands|menu)\b.*",
        reply: |_caps, _turn| { HELP_TEXT.to_string() }
    }
}

pub fn rule_how_are_you() -> Rule {
    rule! {
        intent: "small_talk_howareyou",
        pattern: r"^(how are you|how r you|how're you)\b.*",
        reply: |_caps, _turn| {
            "I’m doing good! I’m here and ready to help. What would you like to ask?".to_string()
        }
    }
}

pub fn rule_who_are_you() -> Rule {
    rule! {
        intent: "small_talk_whoareyou",
        pattern: r"^(who are you|what are you)\b.*",
        reply: |_caps, _turn| {
            "I’m a simple rule-based chatbot. I use pattern matching and a knowledge base to answer questions."
                .to_string()
        }
    }
}

pub fn rule_thanks() -> Rule {
    rule! {
        intent: "thanks",
        pattern: r"^(thanks|thank you|thx)\b.*",
        reply: |_caps, _turn| { "You’re welcome! If you need more help, just type 'help'.".to_string() }
    }
}

pub fn rule_time() -> Rule {
    rule! {
        intent: "time",
        pattern: r"^(time|what time is it)\b.*",
        traits: RuleTraits::CLOCK,
        reply: |_caps, turn| { format!("Current time is: {}", format_timestamp(&turn.now)) }
    }
}

/// The farewell reply only. Whether the session actually ends is decided by
/// the loop from the raw input (`is_exit_command`).
pub fn rule_exit() -> Rule {
    rule! {
        intent: "exit",
        pattern: r"^(exit|quit|bye|goodbye)\b.*",
        traits: RuleTraits::FAREWELL,
        reply: |_caps, turn| {
            match turn.journal_location {
                Some(path) => format!("Goodbye! Conversation saved in {}", path.display()),
                None => "Goodbye!".to_string(),
            }
        }
    }
}
