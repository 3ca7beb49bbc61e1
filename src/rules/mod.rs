//! Built-in intents.
//!
//! `get()` returns the dispatch table in evaluation order. Specific phrases
//! come first; the knowledge rules close the table, and `kb_direct` accepts
//! whatever is left.

mod identity;
mod knowledge;
mod small_talk;


use crate::Rule;

pub fn get() -> Vec<Rule> {
    vec![
        small_talk::rule_greeting(),
        small_talk::rule_help(),
        identity::rule_set_name(),
        identity::rule_ask_name(),
        small_talk::rule_how_are_you(),
        small_talk::rule_who_are_you(),
        small_talk::rule_thanks(),
        small_talk::rule_time(),
        small_talk::rule_exit(),
        knowledge::rule_what_is(),
        knowledge::rule_direct(),
    ]
}
