use crate::error::{Result, SubgenError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the whisper CLI invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperConfig {
    /// Name or path of the whisper binary.
    pub binary: String,
    /// Model size passed to `--model`.
    pub model: String,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            binary: "whisper".to_string(),
            model: "medium".to_string(),
        }
    }
}

/// Settings for the SeamlessM4T inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Base URL of the translation server.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8100".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub whisper: WhisperConfig,
    pub translator: TranslatorConfig,
}

impl Config {
    /// Load configuration from the config file (if present), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                config = toml::from_str(&contents)
                    .map_err(|e| SubgenError::Config(format!("{}: {e}", config_path.display())))?;
            }
        }

        if let Ok(binary) = std::env::var("SUBGEN_WHISPER_BIN") {
            config.whisper.binary = binary;
        }
        if let Ok(model) = std::env::var("SUBGEN_WHISPER_MODEL") {
            config.whisper.model = model;
        }
        if let Ok(endpoint) = std::env::var("SUBGEN_TRANSLATOR_ENDPOINT") {
            config.translator.endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("SUBGEN_TRANSLATOR_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                config.translator.timeout_secs = secs;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.whisper.binary.trim().is_empty() {
            return Err(SubgenError::Config(
                "Whisper binary name must not be empty".to_string(),
            ));
        }
        if self.whisper.model.trim().is_empty() {
            return Err(SubgenError::Config(
                "Whisper model name must not be empty".to_string(),
            ));
        }
        if self.translator.endpoint.trim().is_empty() {
            return Err(SubgenError::Config(
                "Translator endpoint must not be empty. Set SUBGEN_TRANSLATOR_ENDPOINT or the [translator] endpoint in config.toml".to_string(),
            ));
        }
        if self.translator.timeout_secs == 0 {
            return Err(SubgenError::Config(
                "Translator timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subgen").join("config.toml"))
    }
}
