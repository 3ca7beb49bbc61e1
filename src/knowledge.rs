//! Topic → answer knowledge base.
//!
//! Lookup is a three-step cascade over normalized text:
//!
//! ```text
//! query ── normalize ──┬─ exact key            -> MatchKind::Exact
//!                      ├─ loosen + exact key   -> MatchKind::Loosened
//!                      └─ containment scan     -> MatchKind::Contains
//!                           (insertion order, first hit wins)
//! ```
//!
//! The containment scan is permissive on purpose: a short key such as `"ai"`
//! will match any query that contains those two letters, and an empty query is
//! contained in every key. Keys are scanned in insertion order so the result
//! is reproducible when several keys qualify.

use crate::error::{Error, Result};
use crate::text::{loosen, normalize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// How a query was matched to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The normalized query is a key.
    Exact,
    /// The query with punctuation stripped is a key.
    Loosened,
    /// A key contains the query, or the query contains a key.
    Contains,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Loosened => "loosened",
            MatchKind::Contains => "contains",
        }
    }
}

/// A successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeHit<'a> {
    pub key: &'a str,
    pub answer: &'a str,
    pub kind: MatchKind,
}

/// Insertion-ordered mapping from normalized keys to answers.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an answer under the normalized form of `key`.
    ///
    /// Keys that normalize to the empty string are ignored. Re-inserting an
    /// existing key replaces its answer and keeps its original position.
    pub fn insert(&mut self, key: impl AsRef<str>, answer: impl Into<String>) {
        let key = normalize(key.as_ref());
        if key.is_empty() {
            debug!("ignoring knowledge entry with an empty key");
            return;
        }
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = answer.into(),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, answer.into()));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Find the answer for `query`, or `None` if nothing matches.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        self.lookup_detailed(query).map(|hit| hit.answer)
    }

    /// Like [`lookup`](Self::lookup) but also reports the key and the step
    /// that matched.
    pub fn lookup_detailed(&self, query: &str) -> Option<KnowledgeHit<'_>> {
        let query = normalize(query);

        if let Some(hit) = self.exact(&query, MatchKind::Exact) {
            return Some(hit);
        }

        let loosened = loosen(&query);
        if let Some(hit) = self.exact(&loosened, MatchKind::Loosened) {
            return Some(hit);
        }

        self.entries
            .iter()
            .find(|(key, _)| query.contains(key.as_str()) || key.contains(query.as_str()))
            .map(|(key, answer)| KnowledgeHit { key, answer, kind: MatchKind::Contains })
    }

    fn exact(&self, key: &str, kind: MatchKind) -> Option<KnowledgeHit<'_>> {
        let &pos = self.index.get(key)?;
        let (key, answer) = &self.entries[pos];
        Some(KnowledgeHit { key, answer, kind })
    }

    /// Parse a JSON object of string keys to string answers, keeping the
    /// document's key order.
    ///
    /// Entries whose value is not a string are skipped with a warning; a
    /// document that is not an object is an error.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(Error::KnowledgeShape(format!("expected a JSON object, found {}", json_kind(&other))));
            }
        };

        let mut kb = KnowledgeBase::new();
        for (key, value) in map {
            match value {
                serde_json::Value::String(answer) => kb.insert(&key, answer),
                other => warn!(key = %key, kind = json_kind(&other), "skipping non-string knowledge answer"),
            }
        }
        Ok(kb)
    }

    /// Load a knowledge base from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|source| Error::KnowledgeRead { path: path.to_path_buf(), source })?;
        Self::from_json_str(&source)
    }

    /// Load a knowledge base, treating a missing, unreadable or malformed file
    /// as an empty knowledge base.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "knowledge base not found, starting empty");
            return Self::new();
        }
        match Self::from_path(path) {
            Ok(kb) => {
                debug!(path = %path.display(), entries = kb.len(), "loaded knowledge base");
                kb
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "knowledge base unusable, starting empty");
                Self::new()
            }
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kb = KnowledgeBase::new();
        for (key, answer) in iter {
            kb.insert(key, answer);
        }
        kb
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> KnowledgeBase {
        KnowledgeBase::from_iter([
            ("what is ai", "AI is artificial intelligence."),
            ("what is nlp", "NLP is natural language processing."),
            ("how to submit task", "Upload it to the portal before Friday."),
        ])
    }

    #[test]
    fn exact_match() {
        let kb = sample();
        let hit = kb.lookup_detailed("what is nlp").unwrap();
        assert_eq!(hit.answer, "NLP is natural language processing.");
        assert_eq!(hit.kind, MatchKind::Exact);
    }

    #[test]
    fn query_is_normalized_before_matching() {
        let kb = sample();
        let hit = kb.lookup_detailed("  WHAT   is\tNLP ").unwrap();
        assert_eq!(hit.kind, MatchKind::Exact);
    }

    #[test]
    fn loosened_match_strips_punctuation() {
        let kb = sample();
        let hit = kb.lookup_detailed("What is AI?").unwrap();
        assert_eq!(hit.answer, "AI is artificial intelligence.");
        assert_eq!(hit.kind, MatchKind::Loosened);
    }

    #[test]
    fn containment_matches_both_directions() {
        let kb = sample();

        let hit = kb.lookup_detailed("please tell me how to submit task today").unwrap();
        assert_eq!(hit.key, "how to submit task");
        assert_eq!(hit.kind, MatchKind::Contains);

        let hit = kb.lookup_detailed("submit").unwrap();
        assert_eq!(hit.key, "how to submit task");
        assert_eq!(hit.kind, MatchKind::Contains);
    }

    #[test]
    fn containment_prefers_insertion_order() {
        let kb = KnowledgeBase::from_iter([("rust", "first"), ("rust lang", "second")]);
        assert_eq!(kb.lookup("is rust lang fast"), Some("first"));

        let kb = KnowledgeBase::from_iter([("rust lang", "second"), ("rust", "first")]);
        assert_eq!(kb.lookup("is rust lang fast"), Some("second"));
    }

    #[test]
    fn short_keys_over_match() {
        // Known imprecision: "ai" is a substring of "explain".
        let kb = KnowledgeBase::from_iter([("ai", "AI is artificial intelligence.")]);
        assert_eq!(kb.lookup("explain recursion"), Some("AI is artificial intelligence."));
    }

    #[test]
    fn miss_returns_none() {
        let kb = sample();
        assert_eq!(kb.lookup("zzz unknown question"), None);
        assert_eq!(KnowledgeBase::new().lookup("what is ai"), None);
    }

    #[test]
    fn empty_query_is_contained_in_the_first_key() {
        let kb = sample();
        let hit = kb.lookup_detailed("").unwrap();
        assert_eq!(hit.key, "what is ai");
        assert_eq!(hit.kind, MatchKind::Contains);
        assert_eq!(kb.lookup("   "), Some("AI is artificial intelligence."));

        assert_eq!(KnowledgeBase::new().lookup(""), None);
    }

    #[test]
    fn uppercase_greek_query_finds_final_sigma_key() {
        let kb = KnowledgeBase::from_iter([("οδος", "street")]);
        let hit = kb.lookup_detailed("ΟΔΟΣ").unwrap();
        assert_eq!(hit.answer, "street");
        assert_eq!(hit.kind, MatchKind::Exact);
    }

    #[test]
    fn lookup_is_idempotent() {
        let kb = sample();
        for q in ["what is ai?", "submit", "nothing here", "", "  "] {
            assert_eq!(kb.lookup(q), kb.lookup(q));
        }
        assert_eq!(kb.lookup(""), kb.lookup(&normalize("")));
    }

    #[test]
    fn insert_normalizes_and_replaces_in_place() {
        let mut kb = KnowledgeBase::new();
        kb.insert("  What Is  AI ", "old");
        kb.insert("what is nlp", "nlp");
        kb.insert("what is ai", "new");
        kb.insert("   ", "ignored");

        assert_eq!(kb.len(), 2);
        assert_eq!(kb.keys().collect::<Vec<_>>(), vec!["what is ai", "what is nlp"]);
        assert_eq!(kb.lookup("what is ai"), Some("new"));
    }

    #[test]
    fn json_keeps_document_order() {
        let kb = KnowledgeBase::from_json_str(r#"{"zeta": "z", "alpha": "a", "mid": "m"}"#).unwrap();
        assert_eq!(kb.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn json_skips_non_string_answers() {
        let kb = KnowledgeBase::from_json_str(r#"{"a": "yes", "b": 3, "c": null}"#).unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.lookup("a"), Some("yes"));
    }

    #[test]
    fn json_rejects_non_objects() {
        assert!(matches!(KnowledgeBase::from_json_str("[1, 2]"), Err(Error::KnowledgeShape(_))));
        assert!(matches!(KnowledgeBase::from_json_str("{not json"), Err(Error::MalformedKnowledge(_))));
    }

    #[test]
    fn load_or_empty_tolerates_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("absent.json");
        assert!(KnowledgeBase::load_or_empty(&missing).is_empty());
        assert!(matches!(KnowledgeBase::from_path(&missing), Err(Error::KnowledgeRead { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"what is ai\": ").unwrap();
        assert!(KnowledgeBase::load_or_empty(&broken).is_empty());
    }

    #[test]
    fn load_or_empty_reads_valid_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"what is ai": "AI is artificial intelligence."}}"#).unwrap();

        let kb = KnowledgeBase::load_or_empty(file.path());
        assert_eq!(kb.lookup("What is AI?"), Some("AI is artificial intelligence."));
    }
}
