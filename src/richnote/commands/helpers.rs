use crate::commands::ListedNote;
use crate::error::{NoteError, Result};
use crate::store::NoteStore;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How a caller points at a note: by list position or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    /// 1-based position in the store's list.
    Position(usize),
    /// A full UUID, or a unique prefix of one.
    Id(String),
}

impl From<Uuid> for NoteSelector {
    fn from(id: Uuid) -> Self {
        NoteSelector::Id(id.to_string())
    }
}

impl FromStr for NoteSelector {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NoteError::InvalidInput("Empty note selector".into()));
        }
        if let Ok(n) = s.parse::<usize>() {
            return Ok(NoteSelector::Position(n));
        }
        if s.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(NoteSelector::Id(s.to_ascii_lowercase()));
        }
        Err(NoteError::InvalidInput(format!(
            "Not a note position or id: {}",
            s
        )))
    }
}

impl fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteSelector::Position(n) => write!(f, "{}", n),
            NoteSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

pub fn listed_notes(store: &NoteStore) -> Vec<ListedNote> {
    store
        .list()
        .iter()
        .enumerate()
        .map(|(i, note)| ListedNote {
            position: i + 1,
            note: note.clone(),
        })
        .collect()
}

pub fn resolve(store: &NoteStore, selector: &NoteSelector) -> Result<Uuid> {
    match selector {
        NoteSelector::Position(n) => n
            .checked_sub(1)
            .and_then(|i| store.list().get(i))
            .map(|note| note.id())
            .ok_or_else(|| NoteError::InvalidInput(format!("No note at position {}", n))),
        NoteSelector::Id(prefix) => {
            let mut hits = store
                .list()
                .iter()
                .filter(|note| note.id().to_string().starts_with(prefix.as_str()));
            match (hits.next(), hits.next()) {
                (Some(note), None) => Ok(note.id()),
                (Some(_), Some(_)) => Err(NoteError::InvalidInput(format!(
                    "Id prefix {} matches more than one note",
                    prefix
                ))),
                (None, _) => match Uuid::parse_str(prefix) {
                    Ok(id) => Err(NoteError::NotFound(id)),
                    Err(_) => Err(NoteError::InvalidInput(format!(
                        "No note with id starting {}",
                        prefix
                    ))),
                },
            }
        }
    }
}

pub fn resolve_all(store: &NoteStore, selectors: &[NoteSelector]) -> Result<Vec<Uuid>> {
    selectors.iter().map(|s| resolve(store, s)).collect()
}
