use crate::commands::{CmdMessage, CmdResult, NoteSelector};
use crate::error::Result;
use crate::store::NoteStore;

use uuid::Uuid;

use super::helpers::resolve_all;

/// Removes the selected notes. Selectors are all resolved before anything is
/// removed, so positions refer to the list as it was.
pub fn run(store: &mut NoteStore, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let ids = resolve_all(store, selectors)?;
    let mut result = CmdResult::default();

    for id in ids {
        if let Some(note) = store.remove(&id) {
            result.add_message(CmdMessage::success(format!(
                "Note removed: {}",
                note.title()
            )));
            result.affected_notes.push(note);
        }
    }

    Ok(result)
}

/// Removes the note with `id` if there is one. An absent id is not an error.
pub fn remove_by_id(store: &mut NoteStore, id: &Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.remove(id) {
        Some(note) => {
            result.add_message(CmdMessage::success(format!(
                "Note removed: {}",
                note.title()
            )));
            result.affected_notes.push(note);
        }
        None => result.add_message(CmdMessage::info("No such note; nothing removed.")),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;

    #[test]
    fn removes_by_original_positions() {
        let mut store = NoteStore::new();
        for t in ["A", "B", "C"] {
            create::run(&mut store, t.into(), "".into()).unwrap();
        }

        let result = run(
            &mut store,
            &[NoteSelector::Position(1), NoteSelector::Position(3)],
        )
        .unwrap();
        assert_eq!(result.affected_notes.len(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].title(), "B");
    }

    #[test]
    fn remove_by_id_ignores_absent_ids() {
        let mut store = NoteStore::new();
        create::run(&mut store, "A".into(), "".into()).unwrap();
        let id = store.list()[0].id();

        let first = remove_by_id(&mut store, &id).unwrap();
        assert_eq!(first.affected_notes.len(), 1);
        let again = remove_by_id(&mut store, &id).unwrap();
        assert!(again.affected_notes.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn repeated_selector_removes_once() {
        let mut store = NoteStore::new();
        create::run(&mut store, "A".into(), "".into()).unwrap();
        let result = run(
            &mut store,
            &[NoteSelector::Position(1), NoteSelector::Position(1)],
        )
        .unwrap();
        assert_eq!(result.affected_notes.len(), 1);
        assert!(store.is_empty());
    }
}
