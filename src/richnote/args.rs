use clap::{Parser, Subcommand, ValueEnum};
use richnote::attributes::{Alignment, Preset, Rgb};
use richnote::document::Snippet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "richnote", version)]
#[command(about = "Rich-text notes with undo, kept in a single JSON file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $RICHNOTE_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes
    #[command(alias = "ls")]
    List,

    /// Create a new note
    #[command(alias = "n")]
    New {
        /// Title of the note (defaults to the configured default title)
        #[arg(num_args = 0..)]
        title: Vec<String>,

        /// Initial plain text body
        #[arg(short, long, default_value = "")]
        text: String,
    },

    /// Show one or more notes with their formatting
    #[command(alias = "v")]
    Show {
        /// Positions or id prefixes of the notes
        #[arg(required = true, num_args = 1..)]
        notes: Vec<String>,
    },

    /// Rename a note
    Rename {
        /// Position or id prefix of the note
        note: String,

        /// New title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Remove one or more notes
    #[command(alias = "remove")]
    Rm {
        /// Positions or id prefixes of the notes
        #[arg(required = true, num_args = 1..)]
        notes: Vec<String>,
    },

    /// Insert text (or a snippet) at a character offset
    Insert {
        note: String,
        offset: usize,

        /// Text to insert
        #[arg(required_unless_present = "snippet", conflicts_with = "snippet")]
        text: Option<String>,

        /// Insert a canned snippet instead of text
        #[arg(long, value_enum)]
        snippet: Option<SnippetArg>,

        /// Treat the text as a URL and style it as a link
        #[arg(long, conflicts_with = "snippet")]
        link: bool,
    },

    /// Delete a run of characters
    Delete {
        note: String,
        offset: usize,
        length: usize,
    },

    /// Change the formatting of [start, end)
    Style {
        note: String,
        start: usize,
        end: usize,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Replace every occurrence of a string
    Replace {
        note: String,
        needle: String,
        replacement: String,
    },

    /// Write a note's text to a file (formatting is dropped)
    Export { note: String, path: PathBuf },

    /// Create a note from a plain text file
    Import {
        path: PathBuf,

        /// Title for the note (defaults to the file's first line)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Get or set configuration values
    Config {
        /// Configuration key (history_limit, store_file, default_title)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct StyleArgs {
    /// Apply a named preset (title, subtitle, heading1-3, quote, code, highlight, normal)
    #[arg(long, conflicts_with = "clear")]
    pub preset: Option<Preset>,

    /// Remove all formatting
    #[arg(long)]
    pub clear: bool,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub bold: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub italic: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub underline: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub strike: Option<bool>,

    /// Font family
    #[arg(long)]
    pub font: Option<String>,

    /// Font size in points
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,

    /// Foreground color as #rrggbb
    #[arg(long)]
    pub fg: Option<Rgb>,

    /// Background color as #rrggbb
    #[arg(long)]
    pub bg: Option<Rgb>,

    #[arg(long)]
    pub align: Option<Alignment>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SnippetArg {
    Bullet,
    Numbered,
    Table,
}

impl From<SnippetArg> for Snippet {
    fn from(arg: SnippetArg) -> Self {
        match arg {
            SnippetArg::Bullet => Snippet::Bullet,
            SnippetArg::Numbered => Snippet::Numbered,
            SnippetArg::Table => Snippet::Table,
        }
    }
}
