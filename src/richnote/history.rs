//! Bounded undo/redo over [`EditCommand`]s.
//!
//! Two stacks and a limit, nothing else. A fresh edit clears the redo stack
//! (no branching history), and once the undo stack grows past `limit` its
//! oldest entry is dropped for good.
//!
//! The manager never holds a reference to the document: every call takes the
//! document it should act on. Callers own the pairing and must call
//! [`HistoryManager::clear`] whenever they swap the document out, since the
//! recorded offsets only make sense against the buffer they were taken from.

use crate::command::EditCommand;
use crate::document::Document;
use crate::error::{NoteError, Result};
use log::{debug, warn};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<EditCommand>,
    redo_stack: Vec<EditCommand>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryManager {
    /// A limit of zero disables history: edits still apply but are not undoable.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Applies `command` and makes it the newest undoable step.
    ///
    /// No-op commands are applied but not recorded, so they neither consume an
    /// undo step nor discard the redo stack.
    pub fn record_and_apply(&mut self, document: &mut Document, command: EditCommand) -> Result<()> {
        document.apply(&command)?;
        if command.is_noop() {
            return Ok(());
        }
        debug!(
            "history: recorded {} (undo depth {})",
            command.label(),
            self.undo_stack.len() + 1
        );
        self.redo_stack.clear();
        if self.limit == 0 {
            return Ok(());
        }
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.limit {
            if let Some(dropped) = self.undo_stack.pop_front() {
                warn!(
                    "history: limit {} reached, dropping oldest {}",
                    self.limit,
                    dropped.label()
                );
            }
        }
        Ok(())
    }

    pub fn undo(&mut self, document: &mut Document) -> Result<()> {
        let command = self.undo_stack.pop_back().ok_or(NoteError::NothingToUndo)?;
        if let Err(e) = document.invert(&command) {
            self.undo_stack.push_back(command);
            return Err(e);
        }
        debug!("history: undid {}", command.label());
        self.redo_stack.push(command);
        Ok(())
    }

    pub fn redo(&mut self, document: &mut Document) -> Result<()> {
        let command = self.redo_stack.pop().ok_or(NoteError::NothingToRedo)?;
        if let Err(e) = document.apply(&command) {
            self.redo_stack.push(command);
            return Err(e);
        }
        debug!("history: redid {}", command.label());
        self.undo_stack.push_back(command);
        Ok(())
    }
}
