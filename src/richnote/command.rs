//! Reversible edit records.
//!
//! An [`EditCommand`] is built by one of the [`Document`](crate::document::Document)
//! constructors (`insert`, `delete`, `restyle`, ...) against the document's current
//! state, and carries everything needed to replay or revert it later. Building a
//! command never mutates anything; `Document::apply` and `Document::invert` do.

use crate::attributes::AttributeSet;
use crate::document::Span;

/// How a restyle combines the new attributes with the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMode {
    /// Overlay the new keys onto each span's attributes.
    Merge,
    /// Replace each span's attributes outright (clear formatting, presets).
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert `text` at `offset`, formatted with `attrs`.
    Insert {
        offset: usize,
        text: String,
        attrs: AttributeSet,
    },

    /// Remove `length` chars at `offset`. The removed text and the exact span
    /// slices that covered it are kept, in absolute offsets, for undo.
    Delete {
        offset: usize,
        length: usize,
        removed_text: String,
        removed_spans: Vec<Span>,
    },

    /// Restyle `[start, end)`. `old_spans` is the pre-edit formatting of the
    /// range, clipped to its bounds.
    Restyle {
        start: usize,
        end: usize,
        old_spans: Vec<Span>,
        new_attrs: AttributeSet,
        mode: StyleMode,
    },

    /// Several commands applied in order and undone as one step.
    Group(Vec<EditCommand>),
}

impl EditCommand {
    /// True when applying the command cannot change the document.
    pub fn is_noop(&self) -> bool {
        match self {
            EditCommand::Insert { text, .. } => text.is_empty(),
            EditCommand::Delete { length, .. } => *length == 0,
            EditCommand::Restyle { .. } => false,
            EditCommand::Group(cmds) => cmds.iter().all(EditCommand::is_noop),
        }
    }

    /// Short label for log lines and status messages.
    pub fn label(&self) -> &'static str {
        match self {
            EditCommand::Insert { .. } => "insert",
            EditCommand::Delete { .. } => "delete",
            EditCommand::Restyle { .. } => "restyle",
            EditCommand::Group(_) => "group",
        }
    }
}
