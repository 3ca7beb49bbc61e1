//! Conversation journal: an append-only record of every turn.
//!
//! The dispatcher writes one entry per user turn and one per bot reply; the
//! session loop writes a single `SYSTEM` marker when a session starts. The
//! journal is never read back by the bot.
//!
//! A journal failure must not affect the reply, so callers log the error and
//! carry on (see `Chatbot::record`).

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Who produced a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Bot,
    System,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "USER",
            Speaker::Bot => "BOT",
            Speaker::System => "SYSTEM",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single journal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub speaker: Speaker,
    pub message: String,
    /// Already formatted, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl Entry {
    /// Render as a log line (without the trailing newline).
    pub fn to_line(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.speaker, self.message)
    }
}

/// Append-only sink for conversation entries.
pub trait Journal {
    fn append(&mut self, entry: &Entry) -> Result<()>;

    /// Where entries end up, if they are persisted to a file.
    fn location(&self) -> Option<&Path> {
        None
    }
}

impl<J: Journal + ?Sized> Journal for Box<J> {
    fn append(&mut self, entry: &Entry) -> Result<()> {
        (**self).append(entry)
    }

    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}

/// Appends `[timestamp] SPEAKER: message` lines to a text file.
///
/// The file is opened for every append, so a journal pointed at a directory
/// that appears later starts working without a restart.
#[derive(Debug, Clone)]
pub struct FileJournal {
    path: PathBuf,
}

impl FileJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for FileJournal {
    fn append(&mut self, entry: &Entry) -> Result<()> {
        let wrap = |source| Error::Journal { path: self.path.clone(), source };
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path).map_err(wrap)?;
        writeln!(file, "{}", entry.to_line()).map_err(wrap)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Keeps entries in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryJournal {
    entries: Vec<Entry>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl Journal for MemoryJournal {
    fn append(&mut self, entry: &Entry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullJournal;

impl Journal for NullJournal {
    fn append(&mut self, _entry: &Entry) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(speaker: Speaker, message: &str) -> Entry {
        Entry { speaker, message: message.to_string(), timestamp: "2024-05-01 09:30:00".to_string() }
    }

    #[test]
    fn entry_line_format() {
        assert_eq!(entry(Speaker::Bot, "Hello!").to_line(), "[2024-05-01 09:30:00] BOT: Hello!");
        assert_eq!(entry(Speaker::System, "x").to_line(), "[2024-05-01 09:30:00] SYSTEM: x");
    }

    #[test]
    fn file_journal_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        std::fs::write(&path, "earlier line\n").unwrap();

        let mut journal = FileJournal::new(&path);
        journal.append(&entry(Speaker::User, "hi  (intent=greeting)")).unwrap();
        journal.append(&entry(Speaker::Bot, "Hello!")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "earlier line\n\
             [2024-05-01 09:30:00] USER: hi  (intent=greeting)\n\
             [2024-05-01 09:30:00] BOT: Hello!\n"
        );
        assert_eq!(journal.location(), Some(path.as_path()));
    }

    #[test]
    fn file_journal_reports_unwritable_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = FileJournal::new(dir.path().join("missing").join("history.txt"));
        let err = journal.append(&entry(Speaker::Bot, "x")).unwrap_err();
        assert!(matches!(err, Error::Journal { .. }));
    }

    #[test]
    fn boxed_journal_delegates() {
        let mut journal: Box<dyn Journal> = Box::new(MemoryJournal::new());
        journal.append(&entry(Speaker::User, "x")).unwrap();
        assert_eq!(journal.location(), None);
    }
}
