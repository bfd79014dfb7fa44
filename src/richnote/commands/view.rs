use crate::commands::{CmdResult, ListedNote, NoteSelector};
use crate::error::{NoteError, Result};
use crate::store::NoteStore;

use super::helpers::resolve_all;

pub fn run(store: &NoteStore, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let ids = resolve_all(store, selectors)?;
    let mut listed = Vec::with_capacity(ids.len());
    for id in ids {
        let note = store.get(&id).ok_or(NoteError::NotFound(id))?;
        let position = store.position(&id).map(|i| i + 1).unwrap_or_default();
        listed.push(ListedNote {
            position,
            note: note.clone(),
        });
    }
    Ok(CmdResult::default().with_listed_notes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;

    #[test]
    fn views_selected_notes() {
        let mut store = NoteStore::new();
        create::run(&mut store, "A".into(), "alpha".into()).unwrap();
        create::run(&mut store, "B".into(), "beta".into()).unwrap();

        let result = run(&store, &[NoteSelector::Position(2)]).unwrap();
        assert_eq!(result.listed_notes.len(), 1);
        assert_eq!(result.listed_notes[0].position, 2);
        assert_eq!(result.listed_notes[0].note.body().text(), "beta");
    }
}
