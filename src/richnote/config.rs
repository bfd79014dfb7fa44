use crate::error::{NoteError, Result};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::model::DEFAULT_NOTE_TITLE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORE_FILE: &str = "notes.json";

pub const CONFIG_KEYS: [&str; 3] = ["history_limit", "store_file", "default_title"];

/// Configuration for richnote, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Maximum undo steps kept per editing session (0 disables undo)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// File name of the note collection inside the data directory
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Title given to notes created without one
    #[serde(default = "default_title")]
    pub default_title: String,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_store_file() -> String {
    DEFAULT_STORE_FILE.to_string()
}

fn default_title() -> String {
    DEFAULT_NOTE_TITLE.to_string()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            store_file: default_store_file(),
            default_title: default_title(),
        }
    }
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: NotesConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "history_limit" => Some(self.history_limit.to_string()),
            "store_file" => Some(self.store_file.clone()),
            "default_title" => Some(self.default_title.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "history_limit" => {
                self.history_limit = value.trim().parse().map_err(|_| {
                    NoteError::Config(format!("history_limit must be a number, got {}", value))
                })?;
            }
            "store_file" => {
                let name = value.trim();
                if name.is_empty() || name.contains(['/', '\\']) {
                    return Err(NoteError::Config(format!(
                        "store_file must be a plain file name, got {:?}",
                        value
                    )));
                }
                self.store_file = name.to_string();
            }
            "default_title" => {
                if value.trim().is_empty() {
                    return Err(NoteError::Config("default_title cannot be empty".into()));
                }
                self.default_title = value.trim().to_string();
            }
            _ => return Err(NoteError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}
