use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kelime_config::Config;
use serde::{Deserialize, Serialize};

/// Platform config folder for the app
pub fn default_root() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("kelime"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

impl Profile {
    /// The API key stays in the environment, never on disk
    fn without_secrets(name: &str, mut value: Config) -> Self {
        value.gateway.api_key.clear();
        Self {
            name: name.into(),
            value,
        }
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))?;

    let main_profile = profiles_dir(root).join("main.json");

    if !main_profile.exists() {
        // Environment driven defaults become the initial main profile
        let profile = Profile::without_secrets("main", Config::new());
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profiles_dir(root).join(format!("{name}.json"));

    let config = if profile_file.exists() {
        read_profile(&profile_file)?
    } else {
        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = profiles_dir(root).join("main.json");
        if main_file.exists() {
            read_profile(&main_file)?
        } else {
            Config::new()
        }
    };

    Ok(config.with_env_secrets())
}
