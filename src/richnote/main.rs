use clap::Parser;
use directories::ProjectDirs;
use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use richnote::api::{ConfigAction, NotesApi};
use richnote::attributes::AttributeSet;
use richnote::commands::edit::EditOp;
use richnote::error::{NoteError, Result};
use richnote::store::fs::FsBackend;
use std::path::PathBuf;

mod args;
mod print;

use args::{Cli, Commands, StyleArgs};
use print::{print_config, print_full_notes, print_messages, print_notes};

const HOME_ENV: &str = "RICHNOTE_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: NotesApi<FsBackend>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let data_dir = resolve_data_dir(cli.dir.clone())?;
    debug!("using data directory {}", data_dir.display());
    let mut ctx = AppContext {
        api: NotesApi::from_dir(&data_dir)?,
    };

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::New { title, text }) => handle_new(&mut ctx, title, text),
        Some(Commands::Show { notes }) => handle_show(&ctx, notes),
        Some(Commands::Rename { note, title }) => handle_rename(&mut ctx, note, title),
        Some(Commands::Rm { notes }) => handle_rm(&mut ctx, notes),
        Some(Commands::Insert {
            note,
            offset,
            text,
            snippet,
            link,
        }) => {
            let op = match snippet {
                Some(snippet) => EditOp::Snippet {
                    offset,
                    snippet: snippet.into(),
                },
                None if link => EditOp::Link {
                    offset,
                    url: text.unwrap_or_default(),
                },
                None => EditOp::Insert {
                    offset,
                    text: text.unwrap_or_default(),
                },
            };
            handle_edit(&mut ctx, note, vec![op])
        }
        Some(Commands::Delete {
            note,
            offset,
            length,
        }) => handle_edit(&mut ctx, note, vec![EditOp::Delete { offset, length }]),
        Some(Commands::Style {
            note,
            start,
            end,
            style,
        }) => {
            let ops = style_ops(start, end, style)?;
            handle_edit(&mut ctx, note, ops)
        }
        Some(Commands::Replace {
            note,
            needle,
            replacement,
        }) => handle_edit(
            &mut ctx,
            note,
            vec![EditOp::ReplaceAll {
                needle,
                replacement,
            }],
        ),
        Some(Commands::Export { note, path }) => handle_export(&ctx, note, path),
        Some(Commands::Import { path, title }) => handle_import(&mut ctx, path, title),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }?;

    if ctx.api.is_dirty() {
        ctx.api.save_all()?;
    }
    Ok(())
}

fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let level = if verbose { "debug" } else { "warn" };
    Logger::try_with_env_or_str(level)
        .and_then(|logger| logger.log_to_stderr().start())
        .map_err(|e| NoteError::Config(format!("failed to start logger: {}", e)))
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "richnote", "richnote")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            NoteError::Config(format!(
                "Could not determine a data directory; pass --dir or set {}",
                HOME_ENV
            ))
        })
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_notes()?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_new(ctx: &mut AppContext, title: Vec<String>, text: String) -> Result<()> {
    let title = if title.is_empty() {
        ctx.api.settings().default_title.clone()
    } else {
        title.join(" ")
    };
    let result = ctx.api.add_note(title, text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, notes: Vec<String>) -> Result<()> {
    let result = ctx.api.view_notes(&notes)?;
    print_full_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, note: String, title: Vec<String>) -> Result<()> {
    let result = ctx.api.rename_note(&note, title.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, notes: Vec<String>) -> Result<()> {
    let result = ctx.api.remove_notes(&notes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, note: String, ops: Vec<EditOp>) -> Result<()> {
    let result = ctx.api.edit_note(&note, &ops)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, note: String, path: PathBuf) -> Result<()> {
    let result = ctx.api.export_text(&note, &path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf, title: Option<String>) -> Result<()> {
    let result = ctx.api.import_text(&path, title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Turns the style flags into edits: a reset (clear or preset) first, then
/// any individual attributes merged on top.
fn style_ops(start: usize, end: usize, style: StyleArgs) -> Result<Vec<EditOp>> {
    let mut ops = Vec::new();
    if style.clear {
        ops.push(EditOp::ClearFormatting { start, end });
    } else if let Some(preset) = style.preset {
        ops.push(EditOp::Preset { start, end, preset });
    }

    let mut attrs = AttributeSet::new();
    if let Some(on) = style.bold {
        attrs = attrs.bold(on);
    }
    if let Some(on) = style.italic {
        attrs = attrs.italic(on);
    }
    if let Some(on) = style.underline {
        attrs = attrs.underline(on);
    }
    if let Some(on) = style.strike {
        attrs = attrs.strikethrough(on);
    }
    if let Some(family) = style.font {
        attrs = attrs.font_family(family);
    }
    if let Some(size) = style.size {
        attrs = attrs.font_size(size);
    }
    if let Some(color) = style.fg {
        attrs = attrs.foreground(color);
    }
    if let Some(color) = style.bg {
        attrs = attrs.background(color);
    }
    if let Some(alignment) = style.align {
        attrs = attrs.alignment(alignment);
    }
    if !attrs.is_default() {
        ops.push(EditOp::Restyle { start, end, attrs });
    }

    if ops.is_empty() {
        return Err(NoteError::InvalidInput(
            "No formatting given; pass --bold, --preset, --clear, ...".into(),
        ));
    }
    Ok(ops)
}
