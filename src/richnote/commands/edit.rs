use crate::attributes::{AttributeSet, Preset};
use crate::commands::{CmdMessage, CmdResult, NoteSelector};
use crate::document::Snippet;
use crate::error::{NoteError, Result};
use crate::session::EditorSession;
use crate::store::NoteStore;
use log::{debug, warn};
use uuid::Uuid;

use super::helpers::resolve;

/// One editing intent, as issued from outside a live session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    Insert { offset: usize, text: String },
    Delete { offset: usize, length: usize },
    Restyle { start: usize, end: usize, attrs: AttributeSet },
    ClearFormatting { start: usize, end: usize },
    Preset { start: usize, end: usize, preset: Preset },
    Snippet { offset: usize, snippet: Snippet },
    Link { offset: usize, url: String },
    ReplaceAll { needle: String, replacement: String },
}

/// Opens an editing session over a copy of the note's body.
pub fn open_session(store: &NoteStore, id: &Uuid, history_limit: usize) -> Result<EditorSession> {
    let note = store.get(id).ok_or(NoteError::NotFound(*id))?;
    Ok(
        EditorSession::for_note(note.id(), note.body().clone(), history_limit)
            .with_source_modified_at(note.modified_at()),
    )
}

/// Writes the session's document back into its note.
///
/// Returns `false` without touching the note when the body is unchanged.
/// Fails with `InvalidInput` when the note was modified after the session was
/// opened (or last committed), e.g. by a reload from storage.
pub fn commit_session(store: &mut NoteStore, session: &mut EditorSession) -> Result<bool> {
    let id = session
        .note_id()
        .ok_or_else(|| NoteError::InvalidInput("Session is not attached to a note".into()))?;
    let note = store.get(&id).ok_or(NoteError::NotFound(id))?;
    if let Some(opened) = session.source_modified_at() {
        if note.modified_at() != opened {
            warn!("edit: refusing stale session for {}", id);
            return Err(NoteError::InvalidInput(format!(
                "Note {} changed since it was opened; reopen it to edit",
                id
            )));
        }
    }
    if note.body() == session.document() {
        return Ok(false);
    }
    let body = session.document().clone();
    store.update(&id, |note| note.set_body(body))?;
    let stamp = store
        .get(&id)
        .map(|n| n.modified_at())
        .ok_or(NoteError::NotFound(id))?;
    session.mark_committed(stamp);
    debug!("edit: committed session for {}", id);
    Ok(true)
}

/// Runs `ops` in order against the selected note, all or nothing: if any op
/// fails the note is left as it was.
pub fn run(
    store: &mut NoteStore,
    selector: &NoteSelector,
    ops: &[EditOp],
    history_limit: usize,
) -> Result<CmdResult> {
    let id = resolve(store, selector)?;
    let mut session = open_session(store, &id, history_limit)?;
    let mut result = CmdResult::default();

    for op in ops {
        apply_op(&mut session, op, &mut result)?;
    }

    if commit_session(store, &mut session)? {
        let note = store.get(&id).cloned().ok_or(NoteError::NotFound(id))?;
        result.add_message(CmdMessage::success(format!("Note updated: {}", note.title())));
        result.affected_notes.push(note);
    } else {
        result.add_message(CmdMessage::info("Nothing changed."));
    }
    Ok(result)
}

fn apply_op(session: &mut EditorSession, op: &EditOp, result: &mut CmdResult) -> Result<()> {
    match op {
        EditOp::Insert { offset, text } => session.insert(*offset, text),
        EditOp::Delete { offset, length } => session.delete(*offset, *length),
        EditOp::Restyle { start, end, attrs } => session.restyle(*start, *end, attrs),
        EditOp::ClearFormatting { start, end } => session.clear_formatting(*start, *end),
        EditOp::Preset { start, end, preset } => session.apply_preset(*start, *end, *preset),
        EditOp::Snippet { offset, snippet } => session.insert_snippet(*offset, *snippet),
        EditOp::Link { offset, url } => session.insert_link(*offset, url),
        EditOp::ReplaceAll {
            needle,
            replacement,
        } => {
            if needle.is_empty() {
                return Err(NoteError::InvalidInput("Search text cannot be empty".into()));
            }
            let count = session.replace_all(needle, replacement)?;
            if count == 0 {
                result.add_message(CmdMessage::warning(format!("No match for {:?}", needle)));
            } else {
                result.add_message(CmdMessage::info(format!(
                    "Replaced {} occurrence(s) of {:?}",
                    count, needle
                )));
            }
            Ok(())
        }
    }
}
