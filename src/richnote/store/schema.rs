//! On-disk schema for the note collection.
//!
//! The whole store is one JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "notes": [
//!     {
//!       "id": "5b1c...",
//!       "title": "Groceries",
//!       "text": "milk, eggs",
//!       "spans": [{ "start": 0, "end": 4, "attrs": { "bold": true } }, ...],
//!       "created_at": "2024-05-01T09:30:00.123456789Z",
//!       "modified_at": "2024-05-01T09:31:12.000000001Z"
//!     }
//!   ]
//! }
//! ```
//!
//! Only attribute keys that are set are written. The dirty flag is runtime
//! state and never persisted. Files written by a newer schema version are
//! refused rather than half-read.

use crate::document::{Document, Span};
use crate::error::{NoteError, PersistenceCause, Result};
use crate::model::Note;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u32,
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Just enough of the file to decide whether the rest can be read.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id(),
            title: note.title().to_string(),
            text: note.body().text().to_string(),
            spans: note.body().spans().to_vec(),
            created_at: note.created_at(),
            modified_at: note.modified_at(),
        }
    }
}

impl TryFrom<NoteRecord> for Note {
    type Error = NoteError;

    fn try_from(record: NoteRecord) -> Result<Self> {
        let body = Document::from_parts(record.text, record.spans).map_err(|e| {
            NoteError::invalid_data(format!("note {} has a bad body: {}", record.id, e))
        })?;
        Ok(Note::restore(
            record.id,
            record.title,
            body,
            record.created_at,
            record.modified_at,
        ))
    }
}

pub fn encode(notes: &[Note]) -> Result<String> {
    let file = StoreFile {
        version: SCHEMA_VERSION,
        notes: notes.iter().map(NoteRecord::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn decode(raw: &str) -> Result<Vec<Note>> {
    let header: VersionHeader = serde_json::from_str(raw)?;
    if header.version > SCHEMA_VERSION {
        return Err(PersistenceCause::UnsupportedVersion {
            found: header.version,
            supported: SCHEMA_VERSION,
        }
        .into());
    }

    let file: StoreFile = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(file.notes.len());
    let mut notes = Vec::with_capacity(file.notes.len());
    for record in file.notes {
        if !seen.insert(record.id) {
            return Err(NoteError::invalid_data(format!(
                "duplicate note id {}",
                record.id
            )));
        }
        notes.push(Note::try_from(record)?);
    }
    Ok(notes)
}
