use crate::config::NotesConfig;
use crate::model::Note;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod rename;
pub mod view;

pub use helpers::NoteSelector;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A note together with its 1-based position in the store's list.
#[derive(Debug, Clone)]
pub struct ListedNote {
    pub position: usize,
    pub note: Note,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<ListedNote>,
    pub paths: Vec<PathBuf>,
    pub config: Option<NotesConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_notes(mut self, notes: Vec<ListedNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: NotesConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when the command changed something that needs saving.
    pub fn changed_store(&self) -> bool {
        !self.affected_notes.is_empty()
    }
}
