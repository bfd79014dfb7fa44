//! # Editor Session
//!
//! The explicit editing context: exactly one [`Document`] and the one
//! [`HistoryManager`] that records edits against it. A UI holds one session per
//! open note and drives it with intents (`insert`, `restyle`, `undo`, ...);
//! every intent returns `Result` and leaves both the document and the history
//! untouched when it fails.
//!
//! Sessions are plain values. Nothing about "the current note" lives in global
//! state, and two sessions never share undo history.

use crate::attributes::{AttributeSet, Preset};
use crate::command::EditCommand;
use crate::document::{Document, Snippet, Span};
use crate::error::Result;
use crate::history::HistoryManager;
use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    note_id: Option<Uuid>,
    document: Document,
    history: HistoryManager,
    /// The document as it was when loaded, to answer `is_modified`.
    baseline: Document,
    /// The note's `modified_at` when this session last synced with it.
    source_modified_at: Option<DateTime<Utc>>,
}

impl EditorSession {
    /// An unattached session over an empty document.
    pub fn new(history_limit: usize) -> Self {
        Self {
            history: HistoryManager::new(history_limit),
            ..Self::default()
        }
    }

    /// A session editing a copy of a stored note's body.
    pub fn for_note(note_id: Uuid, document: Document, history_limit: usize) -> Self {
        Self {
            note_id: Some(note_id),
            baseline: document.clone(),
            document,
            history: HistoryManager::new(history_limit),
            source_modified_at: None,
        }
    }

    /// Remembers the note's `modified_at`, so a commit can tell whether the
    /// note changed underneath the session.
    pub fn with_source_modified_at(mut self, at: DateTime<Utc>) -> Self {
        self.source_modified_at = Some(at);
        self
    }

    pub fn source_modified_at(&self) -> Option<DateTime<Utc>> {
        self.source_modified_at
    }

    /// The current document is now what the note holds.
    pub(crate) fn mark_committed(&mut self, at: DateTime<Utc>) {
        self.baseline = self.document.clone();
        self.source_modified_at = Some(at);
    }

    pub fn note_id(&self) -> Option<Uuid> {
        self.note_id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn spans(&self) -> &[Span] {
        self.document.spans()
    }

    /// True when the document differs from what was loaded.
    pub fn is_modified(&self) -> bool {
        self.document != self.baseline
    }

    /// Replaces the buffer with an empty document and forgets all history.
    pub fn new_document(&mut self) {
        self.load(Document::new());
    }

    /// Replaces the buffer and forgets all history; the old commands would
    /// point into text that no longer exists.
    pub fn load(&mut self, document: Document) {
        debug!("session: loading document of {} chars", document.len());
        self.baseline = document.clone();
        self.document = document;
        self.history.clear();
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        let cmd = self.document.insert(offset, text)?;
        self.record(cmd)
    }

    pub fn delete(&mut self, offset: usize, length: usize) -> Result<()> {
        let cmd = self.document.delete(offset, length)?;
        self.record(cmd)
    }

    pub fn restyle(&mut self, start: usize, end: usize, attrs: &AttributeSet) -> Result<()> {
        let cmd = self.document.restyle(start, end, attrs)?;
        self.record(cmd)
    }

    pub fn clear_formatting(&mut self, start: usize, end: usize) -> Result<()> {
        let cmd = self.document.clear_formatting(start, end)?;
        self.record(cmd)
    }

    pub fn apply_preset(&mut self, start: usize, end: usize, preset: Preset) -> Result<()> {
        let cmd = self.document.apply_preset(start, end, preset)?;
        self.record(cmd)
    }

    pub fn insert_snippet(&mut self, offset: usize, snippet: Snippet) -> Result<()> {
        let cmd = self.document.insert_snippet(offset, snippet)?;
        self.record(cmd)
    }

    /// Inserts `url` styled as a link; one undo step removes it.
    pub fn insert_link(&mut self, offset: usize, url: &str) -> Result<()> {
        let cmd = self.document.insert_link(offset, url)?;
        self.record(cmd)
    }

    /// Replaces the next occurrence of `needle` at or after `from`.
    ///
    /// Returns the offset that was replaced, or `None` when there was no match
    /// (nothing is recorded in that case).
    pub fn replace_next(&mut self, needle: &str, replacement: &str, from: usize) -> Result<Option<usize>> {
        let Some(at) = self.document.find(needle, from) else {
            return Ok(None);
        };
        let cmd = self
            .document
            .replace(at, needle.chars().count(), replacement)?;
        self.record(cmd)?;
        Ok(Some(at))
    }

    /// Replaces every occurrence of `needle`, each as its own undo step.
    pub fn replace_all(&mut self, needle: &str, replacement: &str) -> Result<usize> {
        let step = replacement.chars().count();
        let mut from = 0;
        let mut count = 0;
        while let Some(at) = self.replace_next(needle, replacement, from)? {
            from = at + step;
            count += 1;
        }
        Ok(count)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.document)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.document)
    }

    fn record(&mut self, cmd: EditCommand) -> Result<()> {
        self.history.record_and_apply(&mut self.document, cmd)
    }
}
