use std::env;

use serde::{Deserialize, Serialize};

use self::gateway::GatewayConfig;
use self::speech::SpeechConfig;
use self::storage::StorageConfig;

pub mod gateway;
pub mod speech;
pub mod storage;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Capacity of the app <-> ui channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let channel_capacity = env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_channel_capacity);

        let mut speech = SpeechConfig::default();
        if let Ok(command) = env::var("KELIME_TTS") {
            speech.command = command;
        }

        Config {
            gateway: GatewayConfig::new(),
            storage: StorageConfig::new(),
            speech,

            channel_capacity,
        }
    }

    /// Fill secrets that are never written to the profile file
    pub fn with_env_secrets(mut self) -> Self {
        if self.gateway.api_key.is_empty() {
            self.gateway.api_key = GatewayConfig::new().api_key;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            storage: StorageConfig::default(),
            speech: SpeechConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"gateway":{"model":"gemini-pro"}}"#).unwrap();
        assert_eq!(config.gateway.model, "gemini-pro");
        assert_eq!(config.gateway.batch_size, 5);
        assert_eq!(config.gateway.example_count, 3);
        assert_eq!(config.storage.slot, "myWords.json");
        assert!(config.speech.enabled);
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn slot_path_joins_dir_and_slot() {
        let storage = StorageConfig {
            data_dir: "/tmp/kelime".into(),
            slot: "words.json".into(),
        };
        assert_eq!(storage.slot_path(), std::path::Path::new("/tmp/kelime/words.json"));
    }
}
