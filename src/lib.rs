extern crate self as rulebot;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use std::path::Path;

#[macro_use]
mod macros;
mod api;
pub mod config;
mod engine;
pub mod error;
pub mod journal;
pub mod knowledge;
mod rules;
mod text;

pub use api::{Chatbot, Clock, DispatchOutcome, EXIT_COMMANDS, FALLBACK_REPLY, Session, is_exit_command};
pub use config::Config;
pub use engine::{DispatchMetrics, RuleTraits};
pub use error::{Error, Result};
pub use journal::{Entry, FileJournal, Journal, MemoryJournal, NullJournal, Speaker};
pub use knowledge::{KnowledgeBase, KnowledgeHit, MatchKind};
pub use text::{loosen, normalize, title_case};

// --- Internal types ---------------------------------------------------------

pub(crate) type Handler = Box<dyn Fn(&Captures<'_>, &mut Turn<'_>) -> String + Send + Sync>;

/// Box a closure as a [`Handler`]. Passing the closure through this bound is
/// what gives its arguments the right (higher-ranked) lifetimes.
pub(crate) fn into_handler<F>(f: F) -> Handler
where
    F: Fn(&Captures<'_>, &mut Turn<'_>) -> String + Send + Sync + 'static,
{
    Box::new(f)
}

/// One entry of the dispatch table: an intent name, a start-anchored pattern
/// matched against normalized text, and the handler that builds the reply.
///
/// Rules are built with the `rule!` macro from `src/macros.rs`.
pub(crate) struct Rule {
    pub intent: &'static str,
    pub pattern: &'static Regex,
    pub traits: RuleTraits,
    pub handler: Handler,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("intent", &self.intent)
            .field("pattern", &self.pattern.as_str())
            .field("traits", &self.traits)
            .field("handler", &"<function>")
            .finish()
    }
}

/// Everything a handler may read or change while producing one reply.
pub(crate) struct Turn<'a> {
    pub session: &'a mut Session,
    pub knowledge: &'a KnowledgeBase,
    pub now: NaiveDateTime,
    /// File the conversation is journaled to, mentioned in the farewell.
    pub journal_location: Option<&'a Path>,
    /// Set by handlers that answered from the knowledge base.
    pub knowledge_hit: Option<MatchKind>,
}

impl Turn<'_> {
    /// Look `query` up and remember how it matched. Empty answers count as
    /// a miss.
    pub fn consult(&mut self, query: &str) -> Option<String> {
        let hit = self.knowledge.lookup_detailed(query).filter(|hit| !hit.answer.is_empty())?;
        self.knowledge_hit = Some(hit.kind);
        Some(hit.answer.to_string())
    }
}
