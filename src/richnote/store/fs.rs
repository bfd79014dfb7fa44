use super::StorageBackend;
use crate::error::Result;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed storage: the whole collection lives in one JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store file `file_name` inside `dir`.
    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "notes".to_string());
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn read_raw(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write_raw(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            self.ensure_dir(parent)?;
        }

        // Write beside the target, then rename over it, so a failure never
        // truncates the existing file.
        let tmp = self.tmp_path();
        if let Err(e) = fs::write(&tmp, contents) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!("store: could not replace {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::in_dir(dir.path(), "notes.json");
        assert!(backend.read_raw().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_dirs_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("nested").join("notes.json"));
        backend.write_raw("{}").unwrap();
        backend.write_raw("{\"v\":2}").unwrap();

        assert_eq!(backend.read_raw().unwrap().as_deref(), Some("{\"v\":2}"));
        let entries: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn failed_rename_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes.json");
        let backend = FsBackend::new(&target);
        backend.write_raw("old").unwrap();

        // A directory in the way of the rename makes the write fail.
        let blocked = FsBackend::new(dir.path().join("blocked"));
        fs::create_dir(dir.path().join("blocked")).unwrap();
        fs::write(dir.path().join("blocked").join("keep"), "x").unwrap();
        assert!(blocked.write_raw("new").is_err());

        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);
    }
}
