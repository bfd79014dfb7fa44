use super::StorageBackend;
use crate::error::Result;
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Keeps the serialized JSON rather than the notes themselves, so everything
/// that goes through it also goes through the schema. Uses `RefCell` because
/// the core is single-threaded and the trait takes `&self`.
#[derive(Default)]
pub struct MemBackend {
    contents: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `raw`, well-formed or not.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(raw.into())),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn read_raw(&self) -> Result<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write_raw(&self, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "simulated write error").into());
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::attributes::AttributeSet;
    use crate::document::Document;
    use crate::model::Note;
    use crate::store::NoteStore;

    pub struct StoreFixture {
        pub backend: MemBackend,
        pub store: NoteStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                backend: MemBackend::new(),
                store: NoteStore::new(),
            }
        }

        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = format!("Test Note {}", i + 1);
                let content = format!("Content for note {}", i + 1);
                self.store.add(Note::from_plain_text(title, content));
            }
            self
        }

        pub fn with_empty_note(mut self) -> Self {
            self.store.add(Note::from_plain_text("Empty", ""));
            self
        }

        /// A note formatted by two overlapping restyles that end up merged.
        pub fn with_formatted_note(mut self) -> Self {
            let mut body = Document::from_plain_text("Overlapping bold and italic");
            let bold = AttributeSet::new().bold(true);
            for (start, end) in [(0, 15), (12, 20)] {
                let cmd = body.restyle(start, end, &bold).unwrap();
                body.apply(&cmd).unwrap();
            }
            let cmd = body
                .restyle(16, 27, &AttributeSet::new().italic(true))
                .unwrap();
            body.apply(&cmd).unwrap();
            self.store.add(Note::new("Formatted", body));
            self
        }

        /// Saves the store so it is clean and the backend holds it.
        pub fn saved(mut self) -> Self {
            self.store.save_all(&self.backend).unwrap();
            self
        }
    }
}
