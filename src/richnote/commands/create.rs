use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::Note;
use crate::store::NoteStore;

pub fn run(store: &mut NoteStore, title: String, text: String) -> Result<CmdResult> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(NoteError::InvalidInput("Title cannot be empty".into()));
    }

    let note = Note::from_plain_text(title, text);
    store.add(note.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note created ({}): {}",
        store.len(),
        note.title()
    )));
    result.affected_notes.push(note);
    Ok(result)
}
