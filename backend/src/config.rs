//! Application configuration file support.
//!
//! Settings come from a TOML file (see `heatwise.toml`) with every section
//! optional, followed by a small set of environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::algorithms::ranking::DEFAULT_TOP_N;
use crate::db::factory::RepositoryType;
use crate::models::{Coordinate, FALLBACK_LOCATION};

/// File names searched by [`AppConfig::from_default_location`], in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] =
    ["heatwise.toml", "backend/heatwise.toml", "../heatwise.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(rename = "type", default = "default_storage_type")]
    pub storage_type: String,
    /// Seed the demo shelters and weather on startup.
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

/// Location used when a client cannot supply its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Recommendations returned when the request does not ask for a count.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

fn default_storage_type() -> String {
    "local".to_string()
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_latitude() -> f64 {
    FALLBACK_LOCATION.latitude
}

fn default_longitude() -> f64 {
    FALLBACK_LOCATION.longitude
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: default_storage_type(),
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl StorageConfig {
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.storage_type)
    }
}

impl LocationConfig {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first file in [`DEFAULT_CONFIG_PATHS`]
    /// that exists.
    pub fn from_default_location() -> Result<Self> {
        let path = DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .context("No heatwise.toml found in standard locations")?;
        Self::from_file(path)
    }

    /// File configuration if one is found, defaults otherwise, then
    /// environment overrides (`HOST`, `PORT`, `HEATWISE_SEED`).
    ///
    /// A config file that exists but cannot be parsed is an error.
    pub fn load() -> Result<Self> {
        let mut config = match DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
        {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                log::info!("No configuration file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `HEATWISE_SEED` from the environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?;
        }
        if let Ok(seed) = std::env::var("HEATWISE_SEED") {
            self.storage.seed_sample_data = parse_bool(&seed)
                .with_context(|| format!("HEATWISE_SEED must be a boolean, got '{}'", seed))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.storage
            .repository_type()
            .map_err(anyhow::Error::msg)?;
        self.location
            .coordinate()
            .validate()
            .context("Invalid [location] section")?;
        if self.ranking.top_n == 0 {
            anyhow::bail!("ranking.top_n must be greater than zero");
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ranking.top_n, 3);
        assert_eq!(config.location.coordinate(), FALLBACK_LOCATION);
        assert!(config.storage.seed_sample_data);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [storage]
            type = "local"
            seed_sample_data = false
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert!(!config.storage.seed_sample_data);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_toml_str("[storage]\ntype = \"postgres\"").is_err());
        assert!(AppConfig::from_toml_str("[ranking]\ntop_n = 0").is_err());
        assert!(AppConfig::from_toml_str("[server]\nport = \"abc\"").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
