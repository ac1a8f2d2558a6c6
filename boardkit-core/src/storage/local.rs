/// Local filesystem document store.
///
/// Keeps the whole board document as one pretty-printed JSON file and
/// writes it atomically (write to .tmp, fsync, rename, fsync directory).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::types::BoardData;

use super::{DocumentStore, StorageError};

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic write with fsync: write to .tmp, fsync, rename, fsync directory.
    fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
        let tmp_path = path.with_extension("boardkit.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;

        // fsync directory for rename durability
        if let Some(dir) = path.parent() {
            if let Ok(d) = fs::File::open(dir) {
                let _ = d.sync_all();
            }
        }
        Ok(())
    }
}

impl DocumentStore for LocalStore {
    fn load(&self) -> Result<Option<serde_json::Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let raw = serde_json::from_str(&content)?;
        Ok(Some(raw))
    }

    fn save(&self, data: &BoardData) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(data)?;
        Self::atomic_write(&self.path, &content)?;
        log::debug!("[boardkit.storage] Saved document to {:?}", self.path);
        Ok(())
    }
}
