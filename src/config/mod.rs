use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;

use defaults::*;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Global channel catalog: a file path or an http(s) URL
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// Root of the channel-list dataset: a directory or an http(s) base URL
    #[serde(default = "default_channel_list")]
    pub channel_list: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub group_title_fallback: GroupTitleFallback,
    #[serde(default)]
    pub attribute_escaping: AttributeEscaping,
    /// Country fetches allowed in flight at once; output order is unaffected
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

/// Group title used when a channel resolves no categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupTitleFallback {
    #[default]
    Empty,
    CountryName,
}

/// How attribute values and display names are written into `#EXTINF` lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeEscaping {
    /// Values are written exactly as the sources provide them
    #[default]
    Verbatim,
    /// Double quotes become single quotes and line breaks become spaces
    Sanitize,
}

fn default_catalog() -> String {
    DEFAULT_CATALOG_LOCATION.to_string()
}

fn default_channel_list() -> String {
    DEFAULT_CHANNEL_LIST_LOCATION.to_string()
}

fn default_request_timeout() -> String {
    DEFAULT_REQUEST_TIMEOUT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_fetch_concurrency() -> usize {
    DEFAULT_FETCH_CONCURRENCY
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            channel_list: default_channel_list(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            group_title_fallback: GroupTitleFallback::default(),
            attribute_escaping: AttributeEscaping::default(),
            fetch_concurrency: default_fetch_concurrency(),
        }
    }
}

impl HttpConfig {
    /// Parsed request timeout
    pub fn timeout(&self) -> AppResult<Duration> {
        humantime::parse_duration(&self.request_timeout).map_err(|e| {
            AppError::configuration(format!(
                "invalid http.request_timeout '{}': {}",
                self.request_timeout, e
            ))
        })
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            info!("Configuration loaded from: {}", config_file);
            Ok(config)
        } else {
            info!(
                "Config file {} not found, using built-in defaults",
                config_file
            );
            Ok(Self::default())
        }
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> AppResult<()> {
        if self.generation.fetch_concurrency == 0 {
            return Err(AppError::configuration(
                "generation.fetch_concurrency must be at least 1",
            ));
        }
        self.http.timeout()?;
        Ok(())
    }
}
