//! # Rich-Text Document
//!
//! A [`Document`] is a text buffer plus a list of [`Span`]s that partition
//! `[0, len)` exactly. All offsets and lengths count chars (Unicode scalar
//! values), never bytes.
//!
//! ## Canonical Form
//!
//! After every mutation the span list is:
//! - ordered by `start`, gap-free and non-overlapping,
//! - free of zero-length spans,
//! - coalesced: no two neighbours carry equal attributes.
//!
//! An empty document has no spans at all.
//!
//! ## Mutation
//!
//! The editing constructors (`insert`, `delete`, `restyle`, ...) only *describe*
//! an edit: they validate the arguments against the current state and return an
//! [`EditCommand`]. Nothing changes until the command is handed to
//! [`Document::apply`] (usually via the history manager). `apply` and
//! [`Document::invert`] build the next state off to the side and commit it only
//! once the cover has been re-verified, so a failing command leaves the
//! document untouched.

use crate::attributes::{AttributeSet, Preset};
use crate::command::{EditCommand, StyleMode};
use crate::error::{NoteError, Result};
use log::error;
use serde::{Deserialize, Serialize};

/// A half-open range `[start, end)` sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub attrs: AttributeSet,
}

impl Span {
    pub fn new(start: usize, end: usize, attrs: AttributeSet) -> Self {
        Self { start, end, attrs }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Canned text the toolbar can drop at the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snippet {
    Bullet,
    Numbered,
    Table,
}

impl Snippet {
    pub fn text(&self) -> &'static str {
        match self {
            Snippet::Bullet => "\u{2022} ",
            Snippet::Numbered => "1. ",
            Snippet::Table => "|   |   |   |\n|---|---|---|\n|   |   |   |\n",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    spans: Vec<Span>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document whose whole text carries the default attributes.
    ///
    /// This is the import half of the lossy plain-text contract.
    pub fn from_plain_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let spans = if len == 0 {
            Vec::new()
        } else {
            vec![Span::new(0, len, AttributeSet::new())]
        };
        Self { text, spans }
    }

    /// Rebuilds a document from persisted parts.
    ///
    /// Adjacent equal spans are coalesced; gaps, overlaps, zero-length spans and
    /// spans past the end of the text are rejected with `CorruptDocument`.
    pub fn from_parts(text: impl Into<String>, spans: Vec<Span>) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        if let Some(bad) = spans.iter().find(|s| s.is_empty()) {
            return Err(NoteError::CorruptDocument(format!(
                "empty span {}..{}",
                bad.start, bad.end
            )));
        }
        let spans = canonicalize(spans);
        verify(&spans, len)?;
        Ok(Self { text, spans })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The export half of the lossy plain-text contract: all formatting is dropped.
    pub fn to_plain_text(&self) -> String {
        self.text.clone()
    }

    /// Attributes an insertion at `offset` would inherit.
    ///
    /// That is the span covering `offset`, or the last span when `offset == len`,
    /// or the default set for an empty document. `None` when `offset > len`.
    pub fn attrs_at(&self, offset: usize) -> Option<AttributeSet> {
        let len = self.len();
        if offset > len {
            return None;
        }
        let covering = self
            .spans
            .iter()
            .find(|s| s.start <= offset && offset < s.end)
            .or_else(|| self.spans.last().filter(|s| s.end == offset));
        Some(covering.map(|s| s.attrs.clone()).unwrap_or_default())
    }

    /// Char offset of the first occurrence of `needle` at or after `from`.
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        if needle.is_empty() || from > self.len() {
            return None;
        }
        let start_byte = self.byte_offset(from);
        let hit = self.text[start_byte..].find(needle)?;
        Some(from + self.text[start_byte..start_byte + hit].chars().count())
    }

    // --- Command constructors -------------------------------------------------

    pub fn insert(&self, offset: usize, text: &str) -> Result<EditCommand> {
        let attrs = self
            .attrs_at(offset)
            .ok_or_else(|| NoteError::out_of_range(offset, offset, self.len()))?;
        Ok(EditCommand::Insert {
            offset,
            text: text.to_string(),
            attrs,
        })
    }

    pub fn insert_snippet(&self, offset: usize, snippet: Snippet) -> Result<EditCommand> {
        self.insert(offset, snippet.text())
    }

    /// Inserts `url` and styles it as a link, undone in one step.
    ///
    /// The link formatting is merged over what the text would have inherited.
    pub fn insert_link(&self, offset: usize, url: &str) -> Result<EditCommand> {
        if url.is_empty() {
            return Err(NoteError::InvalidInput("Link URL cannot be empty".into()));
        }
        let inherited = self
            .attrs_at(offset)
            .ok_or_else(|| NoteError::out_of_range(offset, offset, self.len()))?;
        let end = offset + url.chars().count();
        Ok(EditCommand::Group(vec![
            EditCommand::Insert {
                offset,
                text: url.to_string(),
                attrs: inherited.clone(),
            },
            EditCommand::Restyle {
                start: offset,
                end,
                old_spans: vec![Span::new(offset, end, inherited)],
                new_attrs: AttributeSet::link(),
                mode: StyleMode::Merge,
            },
        ]))
    }

    pub fn delete(&self, offset: usize, length: usize) -> Result<EditCommand> {
        let len = self.len();
        let end = offset
            .checked_add(length)
            .filter(|end| *end <= len)
            .ok_or_else(|| NoteError::out_of_range(offset, offset.saturating_add(length), len))?;
        Ok(EditCommand::Delete {
            offset,
            length,
            removed_text: self.char_slice(offset, end).to_string(),
            removed_spans: self.spans_in(offset, end),
        })
    }

    /// Overlays `attrs` onto every span in `[start, end)`.
    pub fn restyle(&self, start: usize, end: usize, attrs: &AttributeSet) -> Result<EditCommand> {
        self.restyle_with(start, end, attrs, StyleMode::Merge)
    }

    /// Resets `[start, end)` to the default attributes.
    pub fn clear_formatting(&self, start: usize, end: usize) -> Result<EditCommand> {
        self.restyle_with(start, end, &AttributeSet::new(), StyleMode::Replace)
    }

    /// Sets `[start, end)` to exactly the preset's attributes.
    pub fn apply_preset(&self, start: usize, end: usize, preset: Preset) -> Result<EditCommand> {
        self.restyle_with(start, end, &preset.attributes(), StyleMode::Replace)
    }

    pub fn restyle_with(
        &self,
        start: usize,
        end: usize,
        attrs: &AttributeSet,
        mode: StyleMode,
    ) -> Result<EditCommand> {
        let len = self.len();
        if start > end || end > len {
            return Err(NoteError::out_of_range(start, end, len));
        }
        if start == end {
            return Err(NoteError::EmptyRange(start));
        }
        Ok(EditCommand::Restyle {
            start,
            end,
            old_spans: self.spans_in(start, end),
            new_attrs: attrs.clone(),
            mode,
        })
    }

    /// Replaces `length` chars at `offset` with `replacement` as one undo step.
    ///
    /// The replacement takes the formatting of the first replaced char.
    pub fn replace(&self, offset: usize, length: usize, replacement: &str) -> Result<EditCommand> {
        let delete = self.delete(offset, length)?;
        let attrs = self.attrs_at(offset).unwrap_or_default();
        let insert = EditCommand::Insert {
            offset,
            text: replacement.to_string(),
            attrs,
        };
        Ok(EditCommand::Group(vec![delete, insert]))
    }

    // --- Application ----------------------------------------------------------

    /// Performs the forward edit described by `cmd`.
    pub fn apply(&mut self, cmd: &EditCommand) -> Result<()> {
        let mut next = self.clone();
        next.apply_unchecked(cmd)?;
        next.check()?;
        *self = next;
        Ok(())
    }

    /// Reverts the edit described by `cmd`, which must be the last edit applied.
    pub fn invert(&mut self, cmd: &EditCommand) -> Result<()> {
        let mut next = self.clone();
        next.invert_unchecked(cmd)?;
        next.check()?;
        *self = next;
        Ok(())
    }

    fn apply_unchecked(&mut self, cmd: &EditCommand) -> Result<()> {
        match cmd {
            EditCommand::Insert {
                offset,
                text,
                attrs,
            } => {
                let n = text.chars().count();
                self.require_within(*offset, *offset)?;
                if n == 0 {
                    return Ok(());
                }
                self.splice_text(*offset, *offset, text);
                open_gap(&mut self.spans, *offset, n);
                self.spans.push(Span::new(*offset, *offset + n, attrs.clone()));
                self.settle_spans();
            }
            EditCommand::Delete {
                offset,
                length,
                removed_text,
                ..
            } => {
                let end = *offset + *length;
                self.require_within(*offset, end)?;
                self.require_text(*offset, end, removed_text)?;
                self.splice_text(*offset, end, "");
                close_gap(&mut self.spans, *offset, end);
                self.settle_spans();
            }
            EditCommand::Restyle {
                start,
                end,
                new_attrs,
                mode,
                ..
            } => {
                self.require_within(*start, *end)?;
                split_at(&mut self.spans, *start);
                split_at(&mut self.spans, *end);
                for span in self
                    .spans
                    .iter_mut()
                    .filter(|s| s.start >= *start && s.end <= *end)
                {
                    span.attrs = match mode {
                        StyleMode::Merge => span.attrs.merge(new_attrs),
                        StyleMode::Replace => new_attrs.clone(),
                    };
                }
                self.settle_spans();
            }
            EditCommand::Group(cmds) => {
                for cmd in cmds {
                    self.apply_unchecked(cmd)?;
                }
            }
        }
        Ok(())
    }

    fn invert_unchecked(&mut self, cmd: &EditCommand) -> Result<()> {
        match cmd {
            EditCommand::Insert { offset, text, .. } => {
                let end = *offset + text.chars().count();
                self.require_within(*offset, end)?;
                self.require_text(*offset, end, text)?;
                self.splice_text(*offset, end, "");
                close_gap(&mut self.spans, *offset, end);
                self.settle_spans();
            }
            EditCommand::Delete {
                offset,
                length,
                removed_text,
                removed_spans,
            } => {
                self.require_within(*offset, *offset)?;
                if *length == 0 {
                    return Ok(());
                }
                self.splice_text(*offset, *offset, removed_text);
                open_gap(&mut self.spans, *offset, *length);
                self.spans.extend(removed_spans.iter().cloned());
                self.settle_spans();
            }
            EditCommand::Restyle {
                start,
                end,
                old_spans,
                ..
            } => {
                self.require_within(*start, *end)?;
                split_at(&mut self.spans, *start);
                split_at(&mut self.spans, *end);
                self.spans.retain(|s| s.end <= *start || s.start >= *end);
                self.spans.extend(old_spans.iter().cloned());
                self.settle_spans();
            }
            EditCommand::Group(cmds) => {
                for cmd in cmds.iter().rev() {
                    self.invert_unchecked(cmd)?;
                }
            }
        }
        Ok(())
    }

    // --- Internals ------------------------------------------------------------

    /// Re-verifies the canonical cover. A failure here is an internal fault.
    fn check(&self) -> Result<()> {
        verify(&self.spans, self.len()).inspect_err(|e| error!("document invariant broken: {}", e))
    }

    fn settle_spans(&mut self) {
        let mut spans = std::mem::take(&mut self.spans);
        spans.sort_by_key(|s| s.start);
        self.spans = canonicalize(spans);
    }

    fn require_within(&self, start: usize, end: usize) -> Result<()> {
        let len = self.len();
        if start > end || end > len {
            return Err(NoteError::out_of_range(start, end, len));
        }
        Ok(())
    }

    fn require_text(&self, start: usize, end: usize, expected: &str) -> Result<()> {
        if self.char_slice(start, end) != expected {
            return Err(NoteError::CorruptDocument(format!(
                "text at {}..{} does not match the recorded edit",
                start, end
            )));
        }
        Ok(())
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn char_slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    fn splice_text(&mut self, start: usize, end: usize, with: &str) {
        let range = self.byte_offset(start)..self.byte_offset(end);
        self.text.replace_range(range, with);
    }

    /// Copies of the spans intersecting `[start, end)`, clipped to it.
    fn spans_in(&self, start: usize, end: usize) -> Vec<Span> {
        self.spans
            .iter()
            .filter(|s| s.start < end && s.end > start)
            .map(|s| Span::new(s.start.max(start), s.end.min(end), s.attrs.clone()))
            .collect()
    }
}

/// Ensures a span boundary exists at `pos`.
fn split_at(spans: &mut Vec<Span>, pos: usize) {
    if let Some(i) = spans.iter().position(|s| s.start < pos && pos < s.end) {
        let tail = Span::new(pos, spans[i].end, spans[i].attrs.clone());
        spans[i].end = pos;
        spans.insert(i + 1, tail);
    }
}

/// Shifts everything at or after `at` right by `len`, leaving `[at, at+len)` uncovered.
fn open_gap(spans: &mut Vec<Span>, at: usize, len: usize) {
    split_at(spans, at);
    for span in spans.iter_mut().filter(|s| s.start >= at) {
        span.start += len;
        span.end += len;
    }
}

/// Drops coverage of `[start, end)` and shifts what follows left.
fn close_gap(spans: &mut Vec<Span>, start: usize, end: usize) {
    split_at(spans, start);
    split_at(spans, end);
    spans.retain(|s| s.end <= start || s.start >= end);
    let width = end - start;
    for span in spans.iter_mut().filter(|s| s.start >= end) {
        span.start -= width;
        span.end -= width;
    }
}

/// Drops zero-length spans and coalesces touching neighbours with equal attributes.
fn canonicalize(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans.into_iter().filter(|s| !s.is_empty()) {
        match out.last_mut() {
            Some(prev) if prev.end == span.start && prev.attrs == span.attrs => {
                prev.end = span.end;
            }
            _ => out.push(span),
        }
    }
    out
}

fn verify(spans: &[Span], len: usize) -> Result<()> {
    let mut cursor = 0;
    for (i, span) in spans.iter().enumerate() {
        if span.start != cursor {
            return Err(NoteError::CorruptDocument(format!(
                "span {} starts at {} but the previous one ends at {}",
                i, span.start, cursor
            )));
        }
        if span.is_empty() {
            return Err(NoteError::CorruptDocument(format!(
                "span {} is empty ({}..{})",
                i, span.start, span.end
            )));
        }
        if i > 0 && spans[i - 1].attrs == span.attrs {
            return Err(NoteError::CorruptDocument(format!(
                "spans {} and {} share attributes and should be merged",
                i - 1,
                i
            )));
        }
        cursor = span.end;
    }
    if cursor != len {
        return Err(NoteError::CorruptDocument(format!(
            "spans cover 0..{} but the text has {} chars",
            cursor, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Rgb;

    fn bold() -> AttributeSet {
        AttributeSet::new().bold(true)
    }

    fn apply(doc: &mut Document, cmd: &EditCommand) {
        doc.apply(cmd).unwrap();
    }

    /// "Hello world" with "world" in bold.
    fn sample() -> Document {
        let mut doc = Document::from_plain_text("Hello world");
        let cmd = doc.restyle(6, 11, &bold()).unwrap();
        apply(&mut doc, &cmd);
        doc
    }

    fn assert_round_trips(doc: &Document, cmd: EditCommand) {
        let before = doc.clone();
        let mut after = doc.clone();
        after.apply(&cmd).unwrap();
        after.invert(&cmd).unwrap();
        assert_eq!(after, before, "invert(apply(d, {:?})) != d", cmd);
    }

    #[test]
    fn insert_into_empty_document_uses_default_attrs() {
        let mut doc = Document::new();
        let cmd = doc.insert(0, "Hello").unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(doc.text(), "Hello");
        assert_eq!(doc.spans(), &[Span::new(0, 5, AttributeSet::new())]);
    }

    #[test]
    fn insert_inherits_covering_span() {
        let mut doc = sample();
        let cmd = doc.insert(8, "XX").unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(doc.text(), "Hello woXXrld");
        assert_eq!(
            doc.spans(),
            &[
                Span::new(0, 6, AttributeSet::new()),
                Span::new(6, 13, bold()),
            ]
        );
    }

    #[test]
    fn insert_at_boundary_inherits_following_span() {
        let mut doc = sample();
        let cmd = doc.insert(6, "big ").unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(doc.text(), "Hello big world");
        assert_eq!(doc.spans()[1], Span::new(6, 15, bold()));
    }

    #[test]
    fn insert_at_end_inherits_last_span() {
        let mut doc = sample();
        let cmd = doc.insert(11, "!").unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(doc.spans().last(), Some(&Span::new(6, 12, bold())));
    }

    #[test]
    fn insert_past_end_is_out_of_range() {
        let doc = sample();
        assert!(matches!(
            doc.insert(12, "x"),
            Err(NoteError::OutOfRange { .. })
        ));
    }

    #[test]
    fn delete_across_spans_merges_equal_neighbours() {
        let mut doc = Document::from_plain_text("aaabbbccc");
        let cmd = doc.restyle(3, 6, &bold()).unwrap();
        apply(&mut doc, &cmd);
        assert_eq!(doc.spans().len(), 3);

        let cmd = doc.delete(3, 3).unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(doc.text(), "aaaccc");
        assert_eq!(doc.spans(), &[Span::new(0, 6, AttributeSet::new())]);
    }

    #[test]
    fn delete_keeps_removed_text_and_spans() {
        let doc = sample();
        let cmd = doc.delete(4, 4).unwrap();
        match cmd {
            EditCommand::Delete {
                removed_text,
                removed_spans,
                ..
            } => {
                assert_eq!(removed_text, "o wo");
                assert_eq!(
                    removed_spans,
                    vec![
                        Span::new(4, 6, AttributeSet::new()),
                        Span::new(6, 8, bold()),
                    ]
                );
            }
            other => panic!("expected delete, got {:?}", other),
        }
    }

    #[test]
    fn delete_past_end_fails_and_leaves_document_unchanged() {
        let doc = sample();
        let before = doc.clone();
        assert!(matches!(
            doc.delete(8, 10),
            Err(NoteError::OutOfRange { .. })
        ));
        assert!(matches!(
            doc.delete(usize::MAX, 2),
            Err(NoteError::OutOfRange { .. })
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn delete_everything_leaves_no_spans() {
        let mut doc = sample();
        let cmd = doc.delete(0, 11).unwrap();
        apply(&mut doc, &cmd);
        assert!(doc.is_empty());
        assert!(doc.spans().is_empty());
    }

    #[test]
    fn restyle_splits_straddling_spans() {
        let mut doc = Document::from_plain_text("abcdef");
        let cmd = doc
            .restyle(2, 4, &AttributeSet::new().italic(true))
            .unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(
            doc.spans(),
            &[
                Span::new(0, 2, AttributeSet::new()),
                Span::new(2, 4, AttributeSet::new().italic(true)),
                Span::new(4, 6, AttributeSet::new()),
            ]
        );
    }

    #[test]
    fn restyle_merges_into_existing_attrs() {
        let mut doc = sample();
        let cmd = doc
            .restyle(0, 11, &AttributeSet::new().italic(true))
            .unwrap();
        apply(&mut doc, &cmd);

        assert_eq!(
            doc.spans(),
            &[
                Span::new(0, 6, AttributeSet::new().italic(true)),
                Span::new(6, 11, AttributeSet::new().bold(true).italic(true)),
            ]
        );
    }

    #[test]
    fn overlapping_restyles_coalesce() {
        let mut doc = Document::from_plain_text("abcdefgh");
        let first = doc.restyle(0, 5, &bold()).unwrap();
        apply(&mut doc, &first);
        let second = doc.restyle(3, 8, &bold()).unwrap();
        apply(&mut doc, &second);

        assert_eq!(doc.spans(), &[Span::new(0, 8, bold())]);
    }

    #[test]
    fn restyle_range_errors() {
        let doc = sample();
        assert!(matches!(
            doc.restyle(3, 3, &bold()),
            Err(NoteError::EmptyRange(3))
        ));
        assert!(matches!(
            doc.restyle(4, 2, &bold()),
            Err(NoteError::OutOfRange { .. })
        ));
        assert!(matches!(
            doc.restyle(0, 12, &bold()),
            Err(NoteError::OutOfRange { .. })
        ));
    }

    #[test]
    fn clear_formatting_replaces_attrs() {
        let mut doc = sample();
        let cmd = doc.clear_formatting(0, 11).unwrap();
        apply(&mut doc, &cmd);
        assert_eq!(doc.spans(), &[Span::new(0, 11, AttributeSet::new())]);
    }

    #[test]
    fn preset_replaces_rather_than_merges() {
        let mut doc = sample();
        let cmd = doc.apply_preset(6, 11, Preset::Quote).unwrap();
        apply(&mut doc, &cmd);
        assert_eq!(doc.spans()[1].attrs, Preset::Quote.attributes());
        assert_eq!(doc.spans()[1].attrs.get(crate::attributes::AttrKey::Bold), None);
    }

    #[test]
    fn every_command_kind_inverts_exactly() {
        let doc = sample();
        assert_round_trips(&doc, doc.insert(0, "Oh, ").unwrap());
        assert_round_trips(&doc, doc.insert(6, "big ").unwrap());
        assert_round_trips(&doc, doc.insert(11, "!").unwrap());
        assert_round_trips(&doc, doc.delete(4, 4).unwrap());
        assert_round_trips(&doc, doc.delete(0, 11).unwrap());
        assert_round_trips(&doc, doc.restyle(2, 9, &AttributeSet::new().underline(true)).unwrap());
        assert_round_trips(&doc, doc.restyle(6, 11, &bold()).unwrap());
        assert_round_trips(&doc, doc.clear_formatting(0, 11).unwrap());
        assert_round_trips(&doc, doc.apply_preset(0, 5, Preset::Title).unwrap());
        assert_round_trips(&doc, doc.replace(6, 5, "there").unwrap());
    }

    #[test]
    fn restyle_with_neighbour_merge_inverts() {
        // Bolding "Hello " joins it to the bold "world"; undo must split again.
        let doc = sample();
        let cmd = doc.restyle(0, 6, &bold()).unwrap();
        let mut after = doc.clone();
        after.apply(&cmd).unwrap();
        assert_eq!(after.spans(), &[Span::new(0, 11, bold())]);

        after.invert(&cmd).unwrap();
        assert_eq!(after, doc);
    }

    #[test]
    fn stale_inverse_is_rejected_without_change() {
        let mut doc = Document::from_plain_text("abc");
        let cmd = doc.insert(0, "xyz").unwrap();
        // Never applied, so the text at 0..3 is "abc", not "xyz".
        let before = doc.clone();
        assert!(matches!(
            doc.invert(&cmd),
            Err(NoteError::CorruptDocument(_))
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn insert_link_styles_url_and_undoes_in_one_step() {
        let doc = sample();
        let cmd = doc.insert_link(6, "https://example.org ").unwrap();
        assert_round_trips(&doc, cmd.clone());

        let mut linked = doc.clone();
        apply(&mut linked, &cmd);
        assert_eq!(linked.text(), "Hello https://example.org world");
        // Inherits bold from "world", then gains the link style.
        assert_eq!(
            linked.attrs_at(6).unwrap(),
            bold().merge(&AttributeSet::link())
        );
        assert_eq!(linked.attrs_at(26).unwrap(), bold());
    }

    #[test]
    fn insert_link_rejects_empty_url_and_bad_offset() {
        let doc = sample();
        assert!(matches!(
            doc.insert_link(0, ""),
            Err(NoteError::InvalidInput(_))
        ));
        assert!(matches!(
            doc.insert_link(99, "x"),
            Err(NoteError::OutOfRange { .. })
        ));
    }

    #[test]
    fn replace_takes_formatting_of_replaced_text() {
        let mut doc = sample();
        let cmd = doc.replace(6, 5, "there").unwrap();
        apply(&mut doc, &cmd);
        assert_eq!(doc.text(), "Hello there");
        assert_eq!(doc.spans()[1], Span::new(6, 11, bold()));
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let mut doc = Document::from_plain_text("héllo wörld");
        assert_eq!(doc.len(), 11);
        let cmd = doc.restyle(6, 11, &bold()).unwrap();
        apply(&mut doc, &cmd);
        let cmd = doc.delete(1, 1).unwrap();
        apply(&mut doc, &cmd);
        assert_eq!(doc.text(), "hllo wörld");
        assert_eq!(doc.spans()[1], Span::new(5, 10, bold()));
        assert_eq!(doc.find("wö", 0), Some(5));
    }

    #[test]
    fn find_respects_start_offset() {
        let doc = Document::from_plain_text("one two one");
        assert_eq!(doc.find("one", 0), Some(0));
        assert_eq!(doc.find("one", 1), Some(8));
        assert_eq!(doc.find("three", 0), None);
        assert_eq!(doc.find("", 0), None);
    }

    #[test]
    fn snippets_insert_their_text() {
        let mut doc = Document::from_plain_text("item");
        let cmd = doc.insert_snippet(0, Snippet::Bullet).unwrap();
        apply(&mut doc, &cmd);
        assert_eq!(doc.text(), "\u{2022} item");
    }

    #[test]
    fn plain_text_export_drops_formatting() {
        let doc = sample();
        let reimported = Document::from_plain_text(doc.to_plain_text());
        assert_eq!(reimported.text(), doc.text());
        assert_eq!(reimported.spans(), &[Span::new(0, 11, AttributeSet::new())]);
        assert!(Document::from_plain_text("").spans().is_empty());
    }

    #[test]
    fn from_parts_coalesces_and_validates() {
        let red = AttributeSet::new().foreground(Rgb(255, 0, 0));
        let doc = Document::from_parts(
            "abcd",
            vec![Span::new(0, 2, red.clone()), Span::new(2, 4, red.clone())],
        )
        .unwrap();
        assert_eq!(doc.spans(), &[Span::new(0, 4, red.clone())]);

        let gap = Document::from_parts(
            "abcd",
            vec![Span::new(0, 1, red.clone()), Span::new(2, 4, bold())],
        );
        assert!(matches!(gap, Err(NoteError::CorruptDocument(_))));

        let short = Document::from_parts("abcd", vec![Span::new(0, 3, red)]);
        assert!(matches!(short, Err(NoteError::CorruptDocument(_))));

        let empty = Document::from_parts("ab", vec![Span::new(1, 1, bold())]);
        assert!(matches!(empty, Err(NoteError::CorruptDocument(_))));
    }

    #[test]
    fn attrs_at_follows_inheritance_rule() {
        let doc = sample();
        assert_eq!(doc.attrs_at(0), Some(AttributeSet::new()));
        assert_eq!(doc.attrs_at(6), Some(bold()));
        assert_eq!(doc.attrs_at(11), Some(bold()));
        assert_eq!(doc.attrs_at(12), None);
        assert_eq!(Document::new().attrs_at(0), Some(AttributeSet::new()));
    }
}
