use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::NoteStore;

use super::helpers::listed_notes;

pub fn run(store: &NoteStore) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_notes(listed_notes(store)))
}
