//! Error types for rulebot.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("intent '{0}' is declared more than once")]
    DuplicateIntent(&'static str),

    #[error("catch-all intent '{intent}' must be the last rule (found at position {position} of {total})")]
    CatchAllNotLast { intent: &'static str, position: usize, total: usize },

    #[error("failed to read knowledge base {}: {source}", .path.display())]
    KnowledgeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed knowledge base: {0}")]
    MalformedKnowledge(#[from] serde_json::Error),

    #[error("malformed knowledge base: {0}")]
    KnowledgeShape(String),

    #[error("failed to write conversation log {}: {source}", .path.display())]
    Journal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
