use crate::document::Document;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_NOTE_TITLE: &str = "New Note";

/// A titled rich-text document with a stable identity.
///
/// The `dirty` flag tracks unsaved changes; it is not part of a note's value,
/// so two notes that differ only in dirtiness compare equal.
#[derive(Debug, Clone)]
pub struct Note {
    id: Uuid,
    title: String,
    body: Document,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    dirty: bool,
}

impl Note {
    pub fn new(title: impl Into<String>, body: Document) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body,
            created_at: now,
            modified_at: now,
            dirty: true,
        }
    }

    pub fn from_plain_text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, Document::from_plain_text(text))
    }

    /// Rebuilds a note read back from storage. Restored notes start clean.
    pub(crate) fn restore(
        id: Uuid,
        title: String,
        body: Document,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            body,
            created_at,
            modified_at,
            dirty: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &Document {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_body(&mut self, body: Document) {
        self.body = body;
        self.touch();
    }

    /// Stamps `modified_at` and marks the note dirty.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.body == other.body
            && self.created_at == other.created_at
            && self.modified_at == other.modified_at
    }
}

impl Eq for Note {}
