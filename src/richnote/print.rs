use chrono::{DateTime, Utc};
use colored::Colorize;
use richnote::api::{CmdMessage, ListedNote, MessageLevel};
use richnote::config::{NotesConfig, CONFIG_KEYS};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 50;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_notes(notes: &[ListedNote]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for ln in notes {
        let idx_str = format!("{}. ", ln.position);
        let time_ago = format_time_ago(ln.note.modified_at());

        let title = ln.note.title();
        let preview: String = ln
            .note
            .body()
            .text()
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let dirty_marker = if ln.note.is_dirty() { "*" } else { " " };

        let fixed_width = 4 + idx_str.width() + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title_display = truncate_to_width(title, available);
        let preview_room = available.saturating_sub(title_display.width() + 1);
        let preview_display = truncate_to_width(&preview, preview_room);
        let used = title_display.width()
            + if preview_display.is_empty() {
                0
            } else {
                1 + preview_display.width()
            };
        let padding = available.saturating_sub(used);

        println!(
            "  {} {}{} {}{}  {}",
            dirty_marker,
            idx_str.yellow(),
            title_display.bold(),
            preview_display.dimmed(),
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

/// Full text of each note, followed by its formatted ranges.
pub fn print_full_notes(notes: &[ListedNote]) {
    for (i, ln) in notes.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}",
            format!("{}.", ln.position).yellow(),
            ln.note.title().bold()
        );
        println!("{}", ln.note.id().to_string().dimmed());
        println!("--------------------------------");
        println!("{}", ln.note.body().text());

        let styled: Vec<_> = ln
            .note
            .body()
            .spans()
            .iter()
            .filter(|span| !span.attrs.is_default())
            .collect();
        if !styled.is_empty() {
            println!("--------------------------------");
            for span in styled {
                println!(
                    "{:>6}..{:<6} {}",
                    span.start,
                    span.end,
                    span.attrs.to_string().cyan()
                );
            }
        }
    }
}

pub fn print_config(config: &NotesConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
