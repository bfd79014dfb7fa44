//! # API Facade
//!
//! A thin facade over the command layer, and the single entry point for every
//! richnote operation whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the command function for each operation
//! - **Normalizes inputs** (selector strings become [`NoteSelector`]s, then ids)
//! - **Owns the pieces** a caller would otherwise juggle: the [`NoteStore`],
//!   the [`StorageBackend`] it persists to, and the loaded [`NotesConfig`]
//!
//! It does no printing and no business logic; that lives in `commands/*.rs`.
//!
//! ## Editing
//!
//! Rich-text editing happens in an [`EditorSession`]. [`NotesApi::open`] hands
//! out a session over a copy of a note's body, the caller drives it, and
//! [`NotesApi::commit`] writes the result back. Until committed, nothing in
//! the store changes. For one-shot edits (the CLI), [`NotesApi::edit_note`]
//! does open, apply and commit in one call.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `NotesApi<FsBackend>`
//! - Testing: `NotesApi<MemBackend>`

use crate::commands::{self, edit::EditOp, NoteSelector};
use crate::config::NotesConfig;
use crate::error::Result;
use crate::session::EditorSession;
use crate::store::fs::FsBackend;
use crate::store::{NoteStore, StorageBackend};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct NotesApi<B: StorageBackend> {
    store: NoteStore,
    backend: B,
    config: NotesConfig,
    config_dir: PathBuf,
}

impl NotesApi<FsBackend> {
    /// Loads config and notes from a data directory. A fresh directory yields
    /// default config and an empty store.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let config = NotesConfig::load(dir)?;
        let backend = FsBackend::in_dir(dir, &config.store_file);
        Self::new(backend, config, dir.to_path_buf())
    }
}

impl<B: StorageBackend> NotesApi<B> {
    pub fn new(backend: B, config: NotesConfig, config_dir: PathBuf) -> Result<Self> {
        let store = NoteStore::load(&backend)?;
        Ok(Self {
            store,
            backend,
            config,
            config_dir,
        })
    }

    pub fn list_notes(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn add_note(&mut self, title: String, text: String) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, title, text)
    }

    pub fn view_notes<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn remove_notes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    /// Removes a note by id. An absent id is a silent no-op, so repeating the
    /// call is harmless.
    pub fn remove_note(&mut self, id: uuid::Uuid) -> Result<commands::CmdResult> {
        commands::delete::remove_by_id(&mut self.store, &id)
    }

    pub fn rename_note(&mut self, selector: &str, title: String) -> Result<commands::CmdResult> {
        let selector = NoteSelector::from_str(selector)?;
        commands::rename::run(&mut self.store, &selector, title)
    }

    pub fn edit_note(&mut self, selector: &str, ops: &[EditOp]) -> Result<commands::CmdResult> {
        let selector = NoteSelector::from_str(selector)?;
        commands::edit::run(&mut self.store, &selector, ops, self.config.history_limit)
    }

    pub fn export_text(&self, selector: &str, path: &Path) -> Result<commands::CmdResult> {
        let selector = NoteSelector::from_str(selector)?;
        commands::export::run(&self.store, &selector, path)
    }

    pub fn import_text(&mut self, path: &Path, title: Option<String>) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path, title, &self.config.default_title)
    }

    /// Opens an editing session on a note, with the configured undo depth.
    pub fn open(&self, selector: &str) -> Result<EditorSession> {
        let selector = NoteSelector::from_str(selector)?;
        let id = commands::helpers::resolve(&self.store, &selector)?;
        commands::edit::open_session(&self.store, &id, self.config.history_limit)
    }

    /// Writes a session's document back into its note. Returns whether the
    /// note changed.
    ///
    /// A session opened before the note was changed elsewhere (for instance
    /// before [`NotesApi::load_all`] brought in a newer copy) is refused with
    /// `InvalidInput`; reopen the note instead.
    pub fn commit(&mut self, session: &mut EditorSession) -> Result<bool> {
        commands::edit::commit_session(&mut self.store, session)
    }

    /// Discards in-memory state and reloads from the backend.
    pub fn load_all(&mut self) -> Result<()> {
        self.store.load_all(&self.backend)
    }

    pub fn save_all(&mut self) -> Result<()> {
        self.store.save_all(&self.backend)
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn settings(&self) -> &NotesConfig {
        &self.config
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<NoteSelector>> {
    inputs
        .iter()
        .map(|s| NoteSelector::from_str(s.as_ref()))
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, ListedNote, MessageLevel};
