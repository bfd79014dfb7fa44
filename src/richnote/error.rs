use thiserror::Error;
use uuid::Uuid;

/// Why a load or save of the note collection failed.
#[derive(Error, Debug)]
pub enum PersistenceCause {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported store version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Offset out of range: {offset}..{end} (document length {len})")]
    OutOfRange { offset: usize, end: usize, len: usize },

    #[error("Empty range at offset {0}")]
    EmptyRange(usize),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Note not found: {0}")]
    NotFound(Uuid),

    #[error("Persistence error: {cause}")]
    Persistence {
        #[source]
        cause: PersistenceCause,
    },

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl NoteError {
    /// The user-facing message category for this failure.
    pub fn category(&self) -> &'static str {
        match self {
            NoteError::OutOfRange { .. } | NoteError::EmptyRange(_) => "invalid range",
            NoteError::NothingToUndo => "nothing to undo",
            NoteError::NothingToRedo => "nothing to redo",
            NoteError::NotFound(_) => "note not found",
            NoteError::Persistence { .. } => "storage failure",
            NoteError::CorruptDocument(_) => "internal error",
            NoteError::InvalidInput(_) | NoteError::Config(_) => "invalid input",
        }
    }

    pub(crate) fn out_of_range(offset: usize, end: usize, len: usize) -> Self {
        NoteError::OutOfRange { offset, end, len }
    }

    pub(crate) fn invalid_data(msg: impl Into<String>) -> Self {
        NoteError::Persistence {
            cause: PersistenceCause::InvalidData(msg.into()),
        }
    }
}

impl From<PersistenceCause> for NoteError {
    fn from(cause: PersistenceCause) -> Self {
        NoteError::Persistence { cause }
    }
}

impl From<std::io::Error> for NoteError {
    fn from(err: std::io::Error) -> Self {
        PersistenceCause::Io(err).into()
    }
}

impl From<serde_json::Error> for NoteError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceCause::Serialization(err).into()
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;
