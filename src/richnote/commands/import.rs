use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::Note;
use crate::store::NoteStore;
use std::fs;
use std::path::Path;

/// Creates a note from a plain text file.
///
/// Without an explicit `title`, a non-empty first line becomes the title and
/// the rest is the body; otherwise `default_title` is used and the whole file
/// is the body. Leading blank lines of the body are dropped either way.
pub fn run(
    store: &mut NoteStore,
    path: &Path,
    title: Option<String>,
    default_title: &str,
) -> Result<CmdResult> {
    let raw = fs::read_to_string(path)?;
    let (title, body) = split_title(&raw, title, default_title);
    if title.is_empty() {
        return Err(NoteError::InvalidInput("Title cannot be empty".into()));
    }

    let note = Note::from_plain_text(title, body);
    store.add(note.clone());

    let mut result = CmdResult::default().with_paths(vec![path.to_path_buf()]);
    result.add_message(CmdMessage::success(format!(
        "Imported {} as: {}",
        path.display(),
        note.title()
    )));
    result.affected_notes.push(note);
    Ok(result)
}

fn split_title(raw: &str, title: Option<String>, default_title: &str) -> (String, String) {
    if let Some(title) = title {
        return (title.trim().to_string(), trim_leading_blank_lines(raw).to_string());
    }

    let (first, rest) = raw.split_once('\n').unwrap_or((raw, ""));
    let first = first.trim();
    if first.is_empty() {
        (default_title.to_string(), trim_leading_blank_lines(raw).to_string())
    } else {
        (first.to_string(), trim_leading_blank_lines(rest).to_string())
    }
}

fn trim_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    if rest.trim().is_empty() {
        ""
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(contents: &str, title: Option<&str>) -> Note {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, contents).unwrap();
        let mut store = NoteStore::new();
        run(&mut store, &path, title.map(String::from), "New Note").unwrap();
        store.list()[0].clone()
    }

    #[test]
    fn first_line_becomes_title() {
        let note = import("Groceries\n\n\nmilk\neggs\n", None);
        assert_eq!(note.title(), "Groceries");
        assert_eq!(note.body().text(), "milk\neggs\n");
    }

    #[test]
    fn explicit_title_keeps_whole_file() {
        let note = import("Groceries\nmilk", Some("List"));
        assert_eq!(note.title(), "List");
        assert_eq!(note.body().text(), "Groceries\nmilk");
    }

    #[test]
    fn blank_first_line_falls_back_to_default_title() {
        let note = import("\n  \nbody text", None);
        assert_eq!(note.title(), "New Note");
        assert_eq!(note.body().text(), "body text");
    }

    #[test]
    fn single_line_file_has_empty_body() {
        let note = import("Just a title", None);
        assert_eq!(note.title(), "Just a title");
        assert!(note.body().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NoteStore::new();
        let err = run(&mut store, &dir.path().join("nope.txt"), None, "New Note").unwrap_err();
        assert!(matches!(err, NoteError::Persistence { .. }));
        assert!(store.is_empty());
    }
}
