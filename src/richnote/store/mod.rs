//! # Storage Layer
//!
//! [`NoteStore`] is the in-memory collection of notes: ordered, keyed by id,
//! and persisted or restored only as a whole. Where the bytes live is the
//! business of a [`StorageBackend`]:
//!
//! - [`fs::FsBackend`]: production, one JSON file written via
//!   temp-file-then-rename.
//! - [`memory::MemBackend`]: in-memory, for tests. Can simulate write failures.
//!
//! Keeping the backend behind a trait keeps the store's rules (atomic replace
//! on load, dirty tracking, id uniqueness) testable without a filesystem.
//!
//! ## Failure Semantics
//!
//! - A failed `load_all` leaves the in-memory collection exactly as it was.
//! - A failed `save_all` leaves the store dirty, and with `FsBackend` the
//!   previous file is untouched.
//!
//! Concurrent saves from several threads are not supported; callers serialize
//! them.

use crate::error::{NoteError, Result};
use crate::model::Note;
use log::{debug, info, warn};
use std::collections::HashMap;
use uuid::Uuid;

pub mod fs;
pub mod memory;
pub mod schema;

/// Raw persistence for the serialized collection.
pub trait StorageBackend {
    /// Read the persisted collection. `Ok(None)` means nothing was ever saved.
    fn read_raw(&self) -> Result<Option<String>>;

    /// Replace the persisted collection. Must not leave a partial write behind.
    fn write_raw(&self, contents: &str) -> Result<()>;

    /// Human-readable location for messages (a path, or a virtual name).
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    index: HashMap<Uuid, usize>,
    /// Set by changes that no remaining note records, such as a removal.
    dirty: bool,
}

impl PartialEq for NoteStore {
    fn eq(&self, other: &Self) -> bool {
        self.notes == other.notes
    }
}

impl Eq for NoteStore {}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_notes(notes: Vec<Note>) -> Self {
        let mut store = Self {
            notes,
            index: HashMap::new(),
            dirty: false,
        };
        store.reindex();
        store
    }

    fn reindex(&mut self) {
        self.index = self
            .notes
            .iter()
            .enumerate()
            .map(|(i, note)| (note.id(), i))
            .collect();
    }

    /// Reads a fresh store from `backend`. A backend with no data yields an empty store.
    pub fn load<B: StorageBackend + ?Sized>(backend: &B) -> Result<Self> {
        let notes = match backend.read_raw()? {
            Some(raw) => schema::decode(&raw).inspect_err(|e| {
                warn!("store: rejected {}: {}", backend.describe(), e);
            })?,
            None => {
                debug!("store: nothing saved at {}", backend.describe());
                Vec::new()
            }
        };
        info!("store: loaded {} notes from {}", notes.len(), backend.describe());
        Ok(Self::from_notes(notes))
    }

    /// Replaces the whole collection with what `backend` holds.
    ///
    /// On failure the current notes are kept as they are.
    pub fn load_all<B: StorageBackend + ?Sized>(&mut self, backend: &B) -> Result<()> {
        *self = Self::load(backend)?;
        Ok(())
    }

    /// Writes the whole collection in one pass, then marks every note clean.
    pub fn save_all<B: StorageBackend + ?Sized>(&mut self, backend: &B) -> Result<()> {
        let raw = schema::encode(&self.notes)?;
        backend.write_raw(&raw)?;
        for note in &mut self.notes {
            note.mark_clean();
        }
        self.dirty = false;
        info!("store: saved {} notes to {}", self.notes.len(), backend.describe());
        Ok(())
    }

    /// Appends `note`, or replaces the note with the same id in place.
    pub fn add(&mut self, note: Note) {
        self.dirty = true;
        match self.index.get(&note.id()) {
            Some(&i) => self.notes[i] = note,
            None => {
                self.index.insert(note.id(), self.notes.len());
                self.notes.push(note);
            }
        }
    }

    /// Removes and returns the note. Absent ids are a silent no-op.
    pub fn remove(&mut self, id: &Uuid) -> Option<Note> {
        let i = self.index.remove(id)?;
        let note = self.notes.remove(i);
        self.reindex();
        self.dirty = true;
        Some(note)
    }

    /// Runs `f` on the note and marks it modified.
    pub fn update<R>(&mut self, id: &Uuid, f: impl FnOnce(&mut Note) -> R) -> Result<R> {
        let i = *self.index.get(id).ok_or(NoteError::NotFound(*id))?;
        let note = &mut self.notes[i];
        let out = f(note);
        note.touch();
        Ok(out)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.index.get(id).map(|&i| &self.notes[i])
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// True when the collection or any note has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.notes.iter().any(Note::is_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::fixtures::StoreFixture;
    use super::memory::MemBackend;
    use super::*;
    use crate::error::PersistenceCause;

    #[test]
    fn add_and_get_by_id() {
        let mut store = NoteStore::new();
        let note = Note::from_plain_text("A", "alpha");
        let id = note.id();
        store.add(note);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().title(), "A");
        assert_eq!(store.position(&id), Some(0));
    }

    #[test]
    fn adding_existing_id_replaces_in_place() {
        let mut store = NoteStore::new();
        let mut note = Note::from_plain_text("A", "");
        store.add(Note::from_plain_text("first", ""));
        store.add(note.clone());
        note.set_title("A2");
        store.add(note.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].title(), "A2");
    }

    #[test]
    fn remove_keeps_order_and_index_consistent() {
        let fixture = StoreFixture::new().with_notes(3);
        let mut store = fixture.store;
        let ids: Vec<Uuid> = store.list().iter().map(Note::id).collect();

        assert!(store.remove(&ids[0]).is_some());
        assert_eq!(store.position(&ids[1]), Some(0));
        assert_eq!(store.position(&ids[2]), Some(1));
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let mut store = StoreFixture::new().with_notes(2).store;
        let before = store.clone();
        assert!(store.remove(&Uuid::new_v4()).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn removal_of_clean_note_is_saved() {
        let fixture = StoreFixture::new().with_notes(2).saved();
        let mut store = NoteStore::load(&fixture.backend).unwrap();
        assert!(!store.is_dirty());

        let id = store.list()[0].id();
        store.remove(&id);
        assert!(store.is_dirty());

        store.save_all(&fixture.backend).unwrap();
        assert!(!store.is_dirty());

        let reloaded = NoteStore::load(&fixture.backend).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get(&id).is_none());
    }

    #[test]
    fn failed_save_after_removal_stays_dirty() {
        let fixture = StoreFixture::new().with_notes(1).saved();
        let mut store = fixture.store;
        let id = store.list()[0].id();
        store.remove(&id);

        fixture.backend.set_simulate_write_error(true);
        assert!(store.save_all(&fixture.backend).is_err());
        assert!(store.is_dirty());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = NoteStore::new();
        let id = Uuid::new_v4();
        let err = store.update(&id, |n| n.set_title("x")).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(missing) if missing == id));
    }

    #[test]
    fn update_marks_note_dirty() {
        let fixture = StoreFixture::new().with_notes(1).saved();
        let mut store = fixture.store;
        assert!(!store.is_dirty());

        let id = store.list()[0].id();
        store.update(&id, |n| n.set_title("Renamed")).unwrap();
        assert!(store.is_dirty());
    }

    #[test]
    fn save_then_load_round_trips() {
        for count in [0, 1, 5] {
            let fixture = StoreFixture::new()
                .with_notes(count)
                .with_empty_note()
                .with_formatted_note()
                .saved();

            let loaded = NoteStore::load(&fixture.backend).unwrap();
            assert_eq!(loaded, fixture.store);
            assert_eq!(loaded.len(), count + 2);
        }
    }

    #[test]
    fn missing_data_loads_empty() {
        let backend = MemBackend::new();
        let store = NoteStore::load(&backend).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failed_load_keeps_current_notes() {
        let mut store = StoreFixture::new().with_notes(2).store;
        let before = store.clone();
        let backend = MemBackend::with_contents("{ definitely not json");

        let err = store.load_all(&backend).unwrap_err();
        assert!(matches!(err, NoteError::Persistence { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn load_all_replaces_rather_than_merges() {
        let saved = StoreFixture::new().with_notes(1).saved();
        let mut store = StoreFixture::new().with_notes(3).store;

        store.load_all(&saved.backend).unwrap();
        assert_eq!(store, saved.store);
    }

    #[test]
    fn failed_save_keeps_notes_dirty_and_old_data() {
        let mut fixture = StoreFixture::new().with_notes(1).saved();
        let old = fixture.backend.contents();

        let id = fixture.store.list()[0].id();
        fixture.store.update(&id, |n| n.set_title("changed")).unwrap();
        fixture.backend.set_simulate_write_error(true);

        let err = fixture.store.save_all(&fixture.backend).unwrap_err();
        assert!(matches!(
            err,
            NoteError::Persistence {
                cause: PersistenceCause::Io(_)
            }
        ));
        assert!(fixture.store.is_dirty());
        assert_eq!(fixture.backend.contents(), old);
    }
}
