//! File locations used by a console session.

use std::path::PathBuf;

pub const DEFAULT_KNOWLEDGE_PATH: &str = "knowledge_base.json";
pub const DEFAULT_LOG_PATH: &str = "conversation_history.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON object of question/topic → answer.
    pub knowledge_path: PathBuf,
    /// Text file the conversation is appended to; `None` disables the log.
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self { knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH), log_path: Some(PathBuf::from(DEFAULT_LOG_PATH)) }
    }
}
