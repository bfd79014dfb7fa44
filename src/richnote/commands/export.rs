use crate::commands::{CmdMessage, CmdResult, NoteSelector};
use crate::error::{NoteError, Result};
use crate::store::NoteStore;
use std::fs;
use std::path::Path;

use super::helpers::resolve;

/// Writes the note's body as plain text. All formatting is dropped.
pub fn run(store: &NoteStore, selector: &NoteSelector, path: &Path) -> Result<CmdResult> {
    let id = resolve(store, selector)?;
    let note = store.get(&id).ok_or(NoteError::NotFound(id))?;

    fs::write(path, note.body().to_plain_text())?;

    let mut result = CmdResult::default().with_paths(vec![path.to_path_buf()]);
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        note.title(),
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn exports_text_without_formatting() {
        let fixture = StoreFixture::new().with_formatted_note();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let result = run(&fixture.store, &NoteSelector::Position(1), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Overlapping bold and italic");
        assert_eq!(result.paths, vec![path]);
        assert!(!result.changed_store());
    }

    #[test]
    fn unwritable_path_is_a_persistence_error() {
        let fixture = StoreFixture::new().with_notes(1);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let err = run(&fixture.store, &NoteSelector::Position(1), &path).unwrap_err();
        assert!(matches!(err, NoteError::Persistence { .. }));
    }
}
