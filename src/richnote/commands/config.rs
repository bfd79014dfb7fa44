use crate::commands::{CmdMessage, CmdResult};
use crate::config::NotesConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = NotesConfig::load(config_dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            let shown = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result)
        }
    }
}
