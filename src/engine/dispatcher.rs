//! First-match dispatcher.
//!
//! The dispatcher walks the `RuleSet` in declaration order and stops at the
//! first pattern that matches the normalized input:
//!
//! ```text
//! "what is ai?"
//!   greeting    ✗
//!   help        ✗
//!   ...
//!   exit        ✗
//!   kb_what_is  ✓  captures: [what is ai?, what is, ai?]  -> handler
//!   kb_direct   (never tried)
//! ```
//!
//! No rule is tried twice and no later rule can override an earlier match.
//! When nothing matches, the caller decides the fallback reply.

use super::metrics::DispatchMetrics;
use super::rule_set::RuleSet;
use crate::{Rule, Turn};
use std::time::Instant;

/// Outcome of one pass over the rule table.
#[derive(Debug)]
pub(crate) struct Resolution<'a> {
    /// The rule that matched and the reply its handler produced.
    pub matched: Option<(&'a Rule, String)>,
    /// Intents tried before and including the match, in order.
    pub tried: Vec<&'static str>,
    pub metrics: DispatchMetrics,
}

#[derive(Debug)]
pub(crate) struct Dispatcher<'a> {
    rules: RuleSet<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(rules: RuleSet<'a>) -> Self {
        Dispatcher { rules }
    }

    pub fn rules(&self) -> &RuleSet<'a> {
        &self.rules
    }

    /// Run `normalized` against the rule table. The input must already be
    /// normalized; patterns never see raw text.
    pub fn run(&self, normalized: &str, turn: &mut Turn<'_>) -> Resolution<'a> {
        let start = Instant::now();
        let mut tried = Vec::new();

        let found = self.rules.iter().find_map(|rule| {
            tried.push(rule.intent);
            rule.pattern.captures(normalized).map(|caps| (rule, caps))
        });
        let matching = start.elapsed();

        let matched = found.map(|(rule, caps)| {
            let reply = (rule.handler)(&caps, turn);
            (rule, reply)
        });

        let total = start.elapsed();
        let handler = if matched.is_some() { total.saturating_sub(matching) } else { Default::default() };
        let metrics = DispatchMetrics { total, matching, handler, evaluated: tried.len() };

        Resolution { matched, tried, metrics }
    }
}
