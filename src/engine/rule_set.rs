//! Rule table validation.
//!
//! A `RuleSet` is the checked, ordered view of the rules the dispatcher walks.
//! Construction enforces the two structural invariants the first-match loop
//! relies on:
//!
//! - Intent names are unique, so the intent reported for a reply identifies
//!   exactly one rule.
//! - At most one rule is flagged `CATCH_ALL`, and it is the last one. Any rule
//!   after it could never fire.
//!
//! Order is taken verbatim from the input slice and never changes afterwards.

use crate::Rule;
use crate::error::{Error, Result};
use std::collections::HashSet;

bitflags::bitflags! {
    /// What a rule's handler does besides returning text.
    ///
    /// Traits are descriptive: they never influence matching order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleTraits: u8 {
        /// Writes session state.
        const STATEFUL  = 1 << 0;
        /// Answers from the knowledge base.
        const KNOWLEDGE = 1 << 1;
        /// Reads the clock.
        const CLOCK     = 1 << 2;
        /// Says goodbye; the session loop decides separately whether to stop.
        const FAREWELL  = 1 << 3;
        /// Accepts any non-empty input.
        const CATCH_ALL = 1 << 4;
    }
}

impl RuleTraits {
    /// Lowercase names of the set flags, for traces.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "STATEFUL" => "stateful",
                "KNOWLEDGE" => "knowledge",
                "CLOCK" => "clock",
                "FAREWELL" => "farewell",
                "CATCH_ALL" => "catch-all",
                _ => "unknown",
            })
            .collect()
    }
}

/// Validated rules in evaluation order.
#[derive(Debug)]
pub(crate) struct RuleSet<'a> {
    rules: Vec<&'a Rule>,
}

impl<'a> RuleSet<'a> {
    pub fn new(rules: &'a [Rule]) -> Result<Self> {
        let mut seen = HashSet::new();
        for (position, rule) in rules.iter().enumerate() {
            if !seen.insert(rule.intent) {
                return Err(Error::DuplicateIntent(rule.intent));
            }
            if rule.traits.contains(RuleTraits::CATCH_ALL) && position + 1 != rules.len() {
                return Err(Error::CatchAllNotLast { intent: rule.intent, position, total: rules.len() });
            }
        }

        Ok(RuleSet { rules: rules.iter().collect() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Rule> + '_ {
        self.rules.iter().copied()
    }

    pub fn intents(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.intent).collect()
    }
}
