use crate::config::Config;
use crate::engine::{DispatchMetrics, Dispatcher, RuleSet, RuleTraits};
use crate::error::Result;
use crate::journal::{Entry, FileJournal, Journal, NullJournal, Speaker};
use crate::knowledge::{KnowledgeBase, MatchKind};
use crate::text::normalize;
use crate::{Rule, Turn};
use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{debug, warn};

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::get);

/// Reply used when no rule accepts the input.
pub const FALLBACK_REPLY: &str = "I didn't understand. Type 'help' to see options.";

/// Inputs that end an interactive session, compared after normalization.
pub const EXIT_COMMANDS: [&str; 4] = ["exit", "quit", "bye", "goodbye"];

pub(crate) const SESSION_STARTED: &str = "--- New chat session started ---";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether the raw input, once normalized, is one of [`EXIT_COMMANDS`].
///
/// The session loop checks this on the input itself, independently of which
/// intent the input was routed to: `"bye for now"` gets a farewell reply but
/// does not end the session.
pub fn is_exit_command(raw: &str) -> bool {
    let text = normalize(raw);
    EXIT_COMMANDS.contains(&text.as_str())
}

/// State remembered across turns of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) user_name: Option<String>,
}

impl Session {
    /// The name the user introduced themselves with, if any.
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }
}

/// Source of "now" for replies and journal timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Local wall-clock time.
    #[default]
    System,
    /// Always the given instant; for tests and reproducible transcripts.
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Current time formatted as `YYYY-MM-DD HH:MM:SS`.
    pub fn stamp(&self) -> String {
        format_timestamp(&self.now())
    }
}

pub(crate) fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Result of [`Chatbot::dispatch_verbose`].
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// The raw input as given.
    pub input: String,
    /// The text the patterns were matched against.
    pub normalized: String,
    pub reply: String,
    /// Intent of the rule that produced the reply; `None` means fallback.
    pub intent: Option<&'static str>,
    /// Traits of the matching rule (empty on fallback).
    pub traits: RuleTraits,
    /// Intents tried in order, ending with the match.
    pub tried: Vec<&'static str>,
    /// Which lookup step answered, when the reply came from the knowledge base.
    pub knowledge: Option<MatchKind>,
    pub metrics: DispatchMetrics,
}

/// A rule-based responder with its own session state and journal.
///
/// The knowledge base is shared read-only, so several bots (one per
/// conversation) can be built from one loaded instance.
///
/// # Example
/// ```
/// use rulebot::{Chatbot, KnowledgeBase, MemoryJournal};
///
/// let kb = KnowledgeBase::from_iter([("what is ai", "AI is artificial intelligence.")]);
/// let mut bot = Chatbot::new(kb, MemoryJournal::new()).unwrap();
///
/// assert_eq!(bot.dispatch("What is AI?"), "AI is artificial intelligence.");
/// ```
#[derive(Debug)]
pub struct Chatbot<J: Journal> {
    dispatcher: Dispatcher<'static>,
    knowledge: Arc<KnowledgeBase>,
    session: Session,
    journal: J,
    clock: Clock,
}

impl Chatbot<Box<dyn Journal>> {
    /// Build a bot from file locations: the knowledge base is loaded (an
    /// unusable file yields an empty one) and the conversation is appended
    /// to the log file, or discarded when no log file is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let knowledge = KnowledgeBase::load_or_empty(&config.knowledge_path);
        let journal: Box<dyn Journal> = match &config.log_path {
            Some(path) => Box::new(FileJournal::new(path)),
            None => Box::new(NullJournal),
        };
        Chatbot::new(knowledge, journal)
    }
}

impl<J: Journal> Chatbot<J> {
    pub fn new(knowledge: impl Into<Arc<KnowledgeBase>>, journal: J) -> Result<Self> {
        let rules = RuleSet::new(&DEFAULT_RULES)?;
        Ok(Chatbot {
            dispatcher: Dispatcher::new(rules),
            knowledge: knowledge.into(),
            session: Session::default(),
            journal,
            clock: Clock::default(),
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }

    pub fn into_journal(self) -> J {
        self.journal
    }

    /// Intent names in evaluation order.
    pub fn intents(&self) -> Vec<&'static str> {
        self.dispatcher.rules().intents()
    }

    /// Journal the session-start marker. Call once, before the first turn.
    pub fn start(&mut self) {
        self.record(Speaker::System, SESSION_STARTED.to_string());
    }

    /// Reply to `raw`. Never fails: unmatched input gets [`FALLBACK_REPLY`].
    pub fn dispatch(&mut self, raw: &str) -> String {
        self.dispatch_verbose(raw).reply
    }

    /// Reply to `raw` and report how the reply was reached.
    pub fn dispatch_verbose(&mut self, raw: &str) -> DispatchOutcome {
        let normalized = normalize(raw);
        let now = self.clock.now();

        let mut turn = Turn {
            session: &mut self.session,
            knowledge: &self.knowledge,
            now,
            journal_location: self.journal.location(),
            knowledge_hit: None,
        };
        let resolution = self.dispatcher.run(&normalized, &mut turn);
        let knowledge = turn.knowledge_hit;

        let (intent, traits, reply) = match resolution.matched {
            Some((rule, reply)) => (Some(rule.intent), rule.traits, reply),
            None => (None, RuleTraits::empty(), FALLBACK_REPLY.to_string()),
        };

        debug!(
            intent = intent.unwrap_or("<fallback>"),
            evaluated = resolution.metrics.evaluated,
            knowledge = knowledge.map(|k| k.as_str()),
            elapsed = ?resolution.metrics.total,
            "dispatched"
        );

        let user_line = match intent {
            Some(intent) => format!("{raw}  (intent={intent})"),
            None => raw.to_string(),
        };
        self.record(Speaker::User, user_line);
        self.record(Speaker::Bot, reply.clone());

        DispatchOutcome {
            input: raw.to_string(),
            normalized,
            reply,
            intent,
            traits,
            tried: resolution.tried,
            knowledge,
            metrics: resolution.metrics,
        }
    }

    /// Append to the journal. Failures are logged and otherwise ignored so a
    /// broken log never costs the user a reply.
    fn record(&mut self, speaker: Speaker, message: String) {
        let entry = Entry { speaker, message, timestamp: self.clock.stamp() };
        if let Err(err) = self.journal.append(&entry) {
            warn!(error = %err, speaker = %speaker, "failed to journal conversation entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use chrono::NaiveDate;

    fn fixed() -> Clock {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        Clock::Fixed(at)
    }

    fn bot(kb: KnowledgeBase) -> Chatbot<MemoryJournal> {
        Chatbot::new(kb, MemoryJournal::new()).unwrap().with_clock(fixed())
    }

    #[test]
    fn exit_commands_are_checked_on_normalized_input() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT "));
        assert!(is_exit_command("Goodbye"));
        assert!(!is_exit_command("bye for now"));
        assert!(!is_exit_command("exit!"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn clock_stamp_format() {
        assert_eq!(fixed().stamp(), "2024-05-01 09:30:00");
    }

    #[test]
    fn matched_turn_journals_intent_and_reply() {
        let mut bot = bot(KnowledgeBase::new());
        bot.start();
        let reply = bot.dispatch("  Hello   there ");

        let entries = bot.journal().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].to_line(), "[2024-05-01 09:30:00] SYSTEM: --- New chat session started ---");
        assert_eq!(entries[1].speaker, Speaker::User);
        assert_eq!(entries[1].message, "  Hello   there   (intent=greeting)");
        assert_eq!(entries[2].speaker, Speaker::Bot);
        assert_eq!(entries[2].message, reply);
    }

    #[test]
    fn empty_input_falls_back_and_journals_without_intent() {
        let mut bot = bot(KnowledgeBase::new());
        let outcome = bot.dispatch_verbose("   ");

        assert_eq!(outcome.reply, FALLBACK_REPLY);
        assert_eq!(outcome.intent, None);
        assert_eq!(outcome.normalized, "");
        assert!(outcome.traits.is_empty());
        assert_eq!(outcome.tried, bot.intents());

        let entries = bot.journal().entries();
        assert_eq!(entries[0].message, "   ");
        assert_eq!(entries[1].message, FALLBACK_REPLY);
    }

    #[test]
    fn verbose_outcome_reports_knowledge_step() {
        let kb = KnowledgeBase::from_iter([("what is ai", "AI is artificial intelligence.")]);
        let mut bot = bot(kb);
        let outcome = bot.dispatch_verbose("What is AI?");

        assert_eq!(outcome.intent, Some("kb_what_is"));
        assert_eq!(outcome.knowledge, Some(MatchKind::Loosened));
        assert!(outcome.traits.contains(RuleTraits::KNOWLEDGE));
        assert_eq!(outcome.tried.last(), Some(&"kb_what_is"));
        assert_eq!(outcome.metrics.evaluated, outcome.tried.len());
    }

    #[test]
    fn journal_failure_does_not_block_replies() {
        struct Broken;
        impl Journal for Broken {
            fn append(&mut self, _entry: &Entry) -> Result<()> {
                Err(crate::Error::KnowledgeShape("unused".into()))
            }
        }

        let mut bot = Chatbot::new(KnowledgeBase::new(), Broken).unwrap();
        assert_eq!(bot.dispatch("thanks"), "You’re welcome! If you need more help, just type 'help'.");
        bot.start();
    }

    #[test]
    fn sessions_are_independent_but_share_knowledge() {
        let kb = Arc::new(KnowledgeBase::from_iter([("what is ai", "AI is artificial intelligence.")]));
        let mut first = Chatbot::new(Arc::clone(&kb), MemoryJournal::new()).unwrap();
        let mut second = Chatbot::new(Arc::clone(&kb), MemoryJournal::new()).unwrap();

        first.dispatch("my name is ammar");
        assert_eq!(first.session().user_name(), Some("Ammar"));
        assert_eq!(second.session().user_name(), None);
        assert_eq!(second.dispatch("what is ai"), "AI is artificial intelligence.");
    }

    #[test]
    fn from_config_uses_file_locations() {
        let dir = tempfile::tempdir().unwrap();
        let kb_path = dir.path().join("kb.json");
        let log_path = dir.path().join("history.txt");
        std::fs::write(&kb_path, r#"{"what is rust": "A systems programming language."}"#).unwrap();

        let config = Config { knowledge_path: kb_path, log_path: Some(log_path.clone()) };
        let mut bot = Chatbot::from_config(&config).unwrap().with_clock(fixed());
        assert_eq!(bot.dispatch("define rust"), "A systems programming language.");
        assert_eq!(bot.dispatch("bye"), format!("Goodbye! Conversation saved in {}", log_path.display()));

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(log.lines().count(), 4);
        assert!(log.starts_with("[2024-05-01 09:30:00] USER: define rust  (intent=kb_what_is)\n"));
    }

    #[test]
    fn from_config_without_log_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { knowledge_path: dir.path().join("absent.json"), log_path: None };

        let mut bot = Chatbot::from_config(&config).unwrap();
        bot.start();
        assert!(bot.knowledge().is_empty());
        assert_eq!(bot.journal().location(), None);
        assert_eq!(bot.dispatch("bye"), "Goodbye!");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
