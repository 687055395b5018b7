//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analysis::DEFAULT_ANALYSIS_DELAY;
use crate::appearance::Palette;
use crate::session::DEFAULT_AUTH_LATENCY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub appearance: AppearanceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Local storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("skin-glow").to_string_lossy().to_string())
        .unwrap_or_else(|| "./skin_glow_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_dir(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// Simulated sign-in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_latency")]
    pub latency_ms: u64,
}

fn default_auth_latency() -> u64 {
    DEFAULT_AUTH_LATENCY.as_millis() as u64
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_auth_latency(),
        }
    }
}

impl AuthConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Skin analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_analysis_delay")]
    pub delay_ms: u64,
}

fn default_analysis_delay() -> u64 {
    DEFAULT_ANALYSIS_DELAY.as_millis() as u64
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_analysis_delay(),
        }
    }
}

impl AnalysisConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Appearance defaults for a fresh profile
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub default_background: Palette,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("skin-glow").join("config.toml")),
            Some(PathBuf::from("/etc/skin-glow/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = var("SKIN_GLOW_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(latency) = var("SKIN_GLOW_AUTH_LATENCY_MS") {
            if let Ok(ms) = latency.parse() {
                self.auth.latency_ms = ms;
            }
        }
        if let Some(delay) = var("SKIN_GLOW_ANALYSIS_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.analysis.delay_ms = ms;
            }
        }

        if let Some(level) = var("SKIN_GLOW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SKIN_GLOW_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Skin Glow Configuration
#
# Environment variables override these settings:
# - SKIN_GLOW_DATA_DIR
# - SKIN_GLOW_AUTH_LATENCY_MS
# - SKIN_GLOW_ANALYSIS_DELAY_MS
# - SKIN_GLOW_LOG_LEVEL
# - SKIN_GLOW_LOG_FORMAT

[storage]
# Directory holding storage.json
data_dir = "~/.local/share/skin-glow"

[auth]
# Simulated sign-in round trip (ms)
latency_ms = 500

[analysis]
# How long the skin analysis takes (ms)
delay_ms = 2000

[appearance]
# Background palette for new profiles: rose, blue, purple, green
default_background = "rose"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/skin-glow/skin-glow.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.auth.latency(), Duration::from_millis(500));
        assert_eq!(config.analysis.delay(), Duration::from_secs(2));
        assert_eq!(config.appearance.default_background, Palette::Rose);
        assert_eq!(config.logging.format, "pretty");
        assert!(
            config.storage.data_dir.ends_with("skin-glow")
                || config.storage.data_dir == "./skin_glow_data"
        );
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, "~/.local/share/skin-glow");
        assert_eq!(config.auth.latency_ms, 500);
        assert_eq!(config.analysis.delay_ms, 2000);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            "[analysis]\ndelay_ms = 50\n\n[appearance]\ndefault_background = \"green\"\n",
        )
        .unwrap();
        assert_eq!(config.analysis.delay_ms, 50);
        assert_eq!(config.auth.latency_ms, 500);
        assert_eq!(config.appearance.default_background, Palette::Green);
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));

        std::fs::write(&path, "[auth\nlatency_ms = 1").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SKIN_GLOW_DATA_DIR", "/tmp/glow"),
            ("SKIN_GLOW_AUTH_LATENCY_MS", "0"),
            ("SKIN_GLOW_ANALYSIS_DELAY_MS", "not-a-number"),
            ("SKIN_GLOW_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/glow");
        assert_eq!(config.auth.latency_ms, 0);
        assert_eq!(config.analysis.delay_ms, 2000);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }
}
