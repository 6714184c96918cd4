use std::fs;
use std::path::{Path, PathBuf};

use kelime_core::{StoreError, WordStore};
use kelime_types::SavedWordSet;

/// Saved words kept as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonWordStore {
    path: PathBuf,
}

impl JsonWordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable slot is set aside, `myWords.json.bak`
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl WordStore for JsonWordStore {
    fn read(&self) -> Result<SavedWordSet, StoreError> {
        if !self.path.exists() {
            tracing::debug!("No saved words at {}", self.path.display());
            return Ok(SavedWordSet::new());
        }

        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(SavedWordSet::new());
        }

        let words: SavedWordSet = match serde_json::from_str(&data) {
            Ok(words) => words,
            Err(source) => {
                // Keep the bad file so the next write can't destroy it
                let backup = self.backup_path();
                fs::rename(&self.path, &backup)?;
                tracing::error!(
                    "Unreadable saved words at {}, moved to {}: {}",
                    self.path.display(),
                    backup.display(),
                    source
                );
                return Err(StoreError::Corrupt { backup, source });
            }
        };
        tracing::info!("Loaded {} saved words from {}", words.len(), self.path.display());
        Ok(words)
    }

    fn write(&self, words: &SavedWordSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write next to the slot, then swap it in
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(words)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("Saved {} words to {}", words.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kelime_types::VocabularyWord;

    use super::*;

    fn sample() -> SavedWordSet {
        vec![
            VocabularyWord::new("Diagnosis", "teşhis", "The diagnosis was confirmed."),
            VocabularyWord::new("Dosage", "dozaj", "Check the dosage twice."),
        ]
        .into()
    }

    #[test]
    fn absent_slot_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonWordStore::new(dir.path().join("myWords.json"));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn write_then_read_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonWordStore::new(dir.path().join("nested").join("myWords.json"));

        store.write(&sample()).unwrap();
        let words = store.read().unwrap();
        assert_eq!(words.keys(), vec!["Diagnosis", "Dosage"]);
        assert!(!dir.path().join("nested").join("myWords.json.tmp").exists());
    }

    #[test]
    fn slot_is_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("myWords.json");
        fs::write(
            &path,
            r#"[{"word":"triage","translation":"önceliklendirme","sentence":"Triage started."}]"#,
        )
        .unwrap();

        let words = JsonWordStore::new(&path).read().unwrap();
        assert_eq!(words.len(), 1);
        assert!(words.contains(&VocabularyWord::new("TRIAGE", "", "")));
    }

    #[test]
    fn corrupt_slot_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("myWords.json");
        let truncated = r#"[{"word":"asset","translation":"varlık","sen"#;
        fs::write(&path, truncated).unwrap();

        let store = JsonWordStore::new(&path);
        match store.read().unwrap_err() {
            StoreError::Corrupt { backup, .. } => {
                assert_eq!(backup, dir.path().join("myWords.json.bak"));
                assert_eq!(fs::read_to_string(&backup).unwrap(), truncated);
            }
            other => panic!("unexpected {other:?}"),
        }

        // The slot is free again and later writes leave the backup alone
        assert!(!path.exists());
        assert!(store.read().unwrap().is_empty());
        store.write(&sample()).unwrap();
        assert_eq!(
            fs::read_to_string(store.backup_path()).unwrap(),
            truncated
        );
    }
}
