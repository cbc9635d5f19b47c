use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the service.
/// Handles loading, saving, and managing server settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the document store HTTP interface.
    pub api_domain: String,
    /// Season used for the team data lookup.
    #[serde(default = "default_season")]
    pub season: i32,
    /// Socket address the HTTP server listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Seconds a cached category stays fresh.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// HTTP timeout in seconds for document store requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs go to the default log directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_season() -> i32 {
    constants::DEFAULT_SEASON
}

fn default_bind_address() -> String {
    constants::DEFAULT_BIND_ADDRESS.to_string()
}

fn default_cache_ttl() -> u64 {
    constants::cache_ttl::CATEGORY_SECONDS
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: String::new(),
            season: default_season(),
            bind_address: default_bind_address(),
            cache_ttl_seconds: default_cache_ttl(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

/// Prefixes `https://` when no scheme is given.
pub fn normalize_api_domain(api_domain: &str) -> String {
    let trimmed = api_domain.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") || trimmed.is_empty() {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

impl Config {
    /// Loads configuration from the default config file location, then
    /// applies environment overrides.
    ///
    /// # Environment Variables
    /// - `SCORELINE_API_DOMAIN` - Override API domain
    /// - `SCORELINE_SEASON` - Override season
    /// - `SCORELINE_BIND_ADDRESS` - Override listen address
    /// - `SCORELINE_CACHE_TTL` - Override cache TTL in seconds (default: 30)
    /// - `SCORELINE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `SCORELINE_LOG_FILE` - Override log file path
    ///
    /// The result is not validated: command line overrides still apply on
    /// top, so callers run [`Config::validate`] once all layers are merged.
    pub async fn load() -> Result<Self, AppError> {
        Self::load_layered(&get_config_path()).await
    }

    /// File at `path` (defaults when missing) with environment overrides applied.
    pub async fn load_layered(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.api_domain = normalize_api_domain(&config.api_domain);

        Ok(config)
    }

    /// Overrides fields from `SCORELINE_*` variables. Unparsable numbers are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Some(season) = std::env::var(env_vars::SEASON)
            .ok()
            .and_then(|s| s.parse::<i32>().ok())
        {
            self.season = season;
        }

        if let Ok(bind_address) = std::env::var(env_vars::BIND_ADDRESS) {
            self.bind_address = bind_address;
        }

        if let Some(ttl) = std::env::var(env_vars::CACHE_TTL)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.cache_ttl_seconds = ttl;
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Prints the stored configuration to stdout.
    ///
    /// Reads the file directly so a partial config (no domain yet) can still
    /// be inspected.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load_from_path(&config_path).await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("API Domain:");
            println!("{}", config.api_domain);
            println!("────────────────────────────────────");
            println!("Season:");
            println!("{}", config.season);
            println!("────────────────────────────────────");
            println!("Bind Address:");
            println!("{}", config.bind_address);
            println!("────────────────────────────────────");
            println!("Cache TTL:");
            println!("{} seconds", config.cache_ttl_seconds);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{}", constants::LOG_FILE_NAME);
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to `path`, creating the parent directory when
    /// needed. The API domain is normalised before writing.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(&Config {
            api_domain: normalize_api_domain(&self.api_domain),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
