use std::path::PathBuf;

use kelime_types::SavedWordSet;

/// Durable slot holding the saved words
pub trait WordStore: Send + Sync {
    /// Read the saved words, an absent slot reads as empty
    fn read(&self) -> Result<SavedWordSet, StoreError>;

    /// Replace the saved words
    fn write(&self, words: &SavedWordSet) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The slot could not be parsed and was moved to `backup`
    #[error("Saved words were unreadable and were moved to {}: {source}", backup.display())]
    Corrupt {
        backup: PathBuf,
        source: serde_json::Error,
    },
}
