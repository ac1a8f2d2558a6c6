pub mod local;

use crate::types::BoardData;

/// Abstract document store provided by the host application.
///
/// The engine writes the full board document through this after every
/// mutation; implementations decide where and how the payload lives.
/// `LocalStore` is the filesystem default.
pub trait DocumentStore: Send + Sync {
    /// Load the raw persisted payload. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<serde_json::Value>, StorageError>;

    /// Durably write the full document.
    fn save(&self, data: &BoardData) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
