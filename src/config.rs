use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Takes precedence over the GEMINI_API_KEY / API_KEY environment
    /// variables when set.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub result_width: u32,
    pub result_height: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            model: default_model(),
            api_key: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 600,
            height: 400,
            result_width: 520,
            result_height: 320,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        if config_path.exists() {
            match Self::read(&config_path) {
                Ok(config) => return config,
                Err(e) => eprintln!("Error loading config.toml: {}. Using defaults.", e),
            }
        } else if let Some(parent) = config_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        Config::default()
    }

    fn read(path: &Path) -> anyhow::Result<Config> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Resolved once at startup; absence is recoverable and surfaced
    /// at request time, not here.
    pub fn api_key(&self) -> Option<String> {
        self.gemini
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn get_config_path() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config/topic-scout/config.toml")
        } else {
            PathBuf::from("config.toml")
        }
    }
}
