use crate::commands::{CmdMessage, CmdResult, NoteSelector};
use crate::error::{NoteError, Result};
use crate::store::NoteStore;

use super::helpers::resolve;

pub fn run(store: &mut NoteStore, selector: &NoteSelector, title: String) -> Result<CmdResult> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(NoteError::InvalidInput("Title cannot be empty".into()));
    }

    let id = resolve(store, selector)?;
    store.update(&id, |note| note.set_title(title))?;
    let note = store.get(&id).cloned().ok_or(NoteError::NotFound(id))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note renamed ({}): {}",
        selector,
        note.title()
    )));
    result.affected_notes.push(note);
    Ok(result)
}
