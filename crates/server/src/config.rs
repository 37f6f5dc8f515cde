//! # Application Configuration
//!
//! Defines the configuration structure for `tablechat-server` and the logic
//! for loading it from an optional `config.yml` file layered with
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory for the rotating log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Path to the sample-queries JSON file served by the samples tab.
    #[serde(default = "default_samples_path")]
    pub samples_path: String,
    /// Provider pre-selected for new sessions.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Engine style pre-selected for new sessions.
    #[serde(default = "default_engine")]
    pub default_engine: String,
    /// Override for the OpenAI endpoint (tests point this at a mock server).
    #[serde(default)]
    pub openai_api_url: Option<String>,
    /// Override for the Gemini endpoint (tests point this at a mock server).
    #[serde(default)]
    pub gemini_api_url: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_samples_path() -> String {
    "data/sample_queries.json".to_string()
}

fn default_provider() -> String {
    "GEMINI".to_string()
}

fn default_engine() -> String {
    "query-engine".to_string()
}

/// Loads the configuration, layering (lowest to highest precedence):
/// serde defaults, an optional YAML file, then environment variables.
pub fn get_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let path = config_path.unwrap_or("config.yml");

    let mut builder = ConfigBuilder::builder();
    if Path::new(path).exists() {
        builder = builder.add_source(File::new(path, FileFormat::Yaml));
    }
    let settings = builder
        .add_source(Environment::default())
        .build()?;

    Ok(settings.try_deserialize()?)
}
