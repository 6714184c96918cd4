use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const APP_NAME: &str = "kelime";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_slot() -> String {
    "myWords.json".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the saved words slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// File name of the saved words slot
    #[serde(default = "default_slot")]
    pub slot: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        let data_dir = env::var("KELIME_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self {
            data_dir,
            slot: default_slot(),
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(&self.slot)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot: default_slot(),
        }
    }
}
