use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_batch_size() -> u32 {
    5
}

fn default_example_count() -> u32 {
    3
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gemini API key, usually taken from the environment
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Words asked for per generation request
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Extra example sentences asked for in a detail request
    #[serde(default = "default_example_count")]
    pub example_count: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GatewayConfig {
    pub fn new() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| default_model());

        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_key,
            model,
            timeout_seconds,
            ..Self::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            batch_size: default_batch_size(),
            example_count: default_example_count(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
