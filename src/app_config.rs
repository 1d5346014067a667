use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source file extensions recognized by the directory walker
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Whether to write per-file diagnostic side files
    #[serde(default)]
    pub emit_diagnostics: bool,

    /// Pattern recognition service config
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Pattern recognition service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecognitionConfig {
    // @field: Whether the service is consulted at all
    #[serde(default)]
    pub enabled: bool,

    // @field: Service URL
    #[serde(default = "default_recognition_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_recognition_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        // Validate extension list
        if self.source_extensions.is_empty() {
            return Err(anyhow!("At least one source extension must be configured"));
        }
        if let Some(bad) = self
            .source_extensions
            .iter()
            .find(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(anyhow!("Invalid source extension: {:?}", bad));
        }

        // Validate the recognition endpoint only when the service is in use
        if self.recognition.enabled {
            Url::parse(&self.recognition.endpoint)
                .map_err(|e| anyhow!("Invalid recognition endpoint '{}': {}", self.recognition.endpoint, e))?;
            if self.recognition.timeout_secs == 0 {
                return Err(anyhow!("Recognition timeout must be greater than zero"));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_extensions: default_source_extensions(),
            emit_diagnostics: false,
            recognition: RecognitionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

fn default_recognition_endpoint() -> String {
    "http://localhost:5001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
