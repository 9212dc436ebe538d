use crate::errors::CoreError;
use crate::generation::backend::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_gateway")]
    pub gateway: GatewayConfig,
    #[serde(default = "default_generation")]
    pub generation: GenerationSettings,
    #[serde(default = "default_privacy")]
    pub privacy: PrivacyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: default_gateway(),
            generation: default_generation(),
            privacy: default_privacy(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sampling settings per round trip. Ideas run hotter than evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_idea_generation")]
    pub idea: GenerationConfig,
    #[serde(default = "default_evaluation_generation")]
    pub evaluation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyConfig {
    #[serde(default = "default_scrub_diagnostics")]
    pub scrub_diagnostics: bool,
}

fn default_gateway() -> GatewayConfig {
    GatewayConfig {
        provider: default_provider(),
        model: default_model(),
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_generation() -> GenerationSettings {
    GenerationSettings {
        idea: default_idea_generation(),
        evaluation: default_evaluation_generation(),
    }
}

fn default_privacy() -> PrivacyConfig {
    PrivacyConfig {
        scrub_diagnostics: default_scrub_diagnostics(),
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_scrub_diagnostics() -> bool {
    true
}

fn default_idea_generation() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.9,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 1024,
    }
}

fn default_evaluation_generation() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.7,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 2048,
    }
}

impl Config {
    /// Load config from the given path, or return defaults if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CoreError::Io(format!("reading config: {e}")))?;
            let config: Config =
                toml::from_str(&contents).map_err(|e| CoreError::Config(e.to_string()))?;

            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write config to the given path.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Io(format!("creating config dir: {e}")))?;
        }
        std::fs::write(path, contents)
            .map_err(|e| CoreError::Io(format!("writing config: {e}")))?;
        Ok(())
    }
}

/// Get the ideaforge data directory (~/.ideaforge/).
pub fn ideaforge_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ideaforge")
}
