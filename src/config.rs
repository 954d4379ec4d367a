//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest rolling history the sampler accepts
pub const MAX_CAPACITY: usize = 10_000;

/// Most decimal places a generated temperature can keep
pub const MAX_PRECISION: u32 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sampler: SamplerConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sampler configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    /// Seconds between readings
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Number of readings kept in the rolling history
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default = "default_min_temp")]
    pub min_temp: f64,

    #[serde(default = "default_max_temp")]
    pub max_temp: f64,

    /// Decimal places kept on generated temperatures
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_capacity() -> usize {
    20
}

fn default_min_temp() -> f64 {
    -18.0
}

fn default_max_temp() -> f64 {
    -16.0
}

fn default_precision() -> u32 {
    1
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            capacity: default_capacity(),
            min_temp: default_min_temp(),
            max_temp: default_max_temp(),
            precision: default_precision(),
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum concurrent WebSocket connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8085
}

fn default_max_connections() -> usize {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_connections: default_max_connections(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` for development or `json` for production
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
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
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("polarwatch").join("config.toml")),
            Some(PathBuf::from("/etc/polarwatch/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject settings the sampler cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sampler = &self.sampler;

        if sampler.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sampler.interval_secs must be at least 1".to_string(),
            ));
        }
        if sampler.capacity == 0 || sampler.capacity > MAX_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "sampler.capacity must be between 1 and {}",
                MAX_CAPACITY
            )));
        }
        if sampler.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "sampler.precision must be at most {}",
                MAX_PRECISION
            )));
        }
        if !sampler.min_temp.is_finite() || !sampler.max_temp.is_finite() {
            return Err(ConfigError::Invalid(
                "sampler temperature bounds must be finite".to_string(),
            ));
        }
        if sampler.min_temp > sampler.max_temp {
            return Err(ConfigError::Invalid(format!(
                "sampler.min_temp ({}) is above sampler.max_temp ({})",
                sampler.min_temp, sampler.max_temp
            )));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Sampler overrides
        if let Some(secs) = env_parse("POLARWATCH_INTERVAL_SECS") {
            self.sampler.interval_secs = secs;
        }
        if let Some(capacity) = env_parse("POLARWATCH_HISTORY_CAPACITY") {
            self.sampler.capacity = capacity;
        }

        // API overrides
        if let Ok(host) = std::env::var("POLARWATCH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = env_parse("POLARWATCH_API_PORT") {
            self.api.port = port;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("POLARWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("POLARWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key = %key, value = %value, "Ignoring unparseable environment override");
            None
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Polarwatch Configuration
#
# Environment variables override these settings:
# - POLARWATCH_INTERVAL_SECS
# - POLARWATCH_HISTORY_CAPACITY
# - POLARWATCH_API_HOST
# - POLARWATCH_API_PORT
# - POLARWATCH_LOG_LEVEL
# - POLARWATCH_LOG_FORMAT

[sampler]
# Seconds between simulated readings
interval_secs = 5

# Number of readings kept in the rolling history
capacity = 20

# Range of generated temperatures (degrees Celsius)
min_temp = -18.0
max_temp = -16.0

# Decimal places kept on generated temperatures
precision = 1

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8085

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Maximum concurrent WebSocket connections
max_connections = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sampler.interval_secs, 5);
        assert_eq!(config.sampler.capacity, 20);
        assert_eq!(config.sampler.min_temp, -18.0);
        assert_eq!(config.sampler.max_temp, -16.0);
        assert_eq!(config.sampler.interval(), Duration::from_secs(5));
        assert_eq!(config.api.addr(), "0.0.0.0:8085");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.sampler.interval_secs, default_interval_secs());
        assert_eq!(config.sampler.capacity, default_capacity());
        assert_eq!(config.api.port, default_port());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampler]\ncapacity = 3\ninterval_secs = 1").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sampler.capacity, 3);
        assert_eq!(config.sampler.interval_secs, 1);
        assert_eq!(config.sampler.max_temp, -16.0);
        assert_eq!(config.api.port, 8085);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampler\ncapacity = ").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_sampler_settings() {
        let mut config = Config::default();
        config.sampler.capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sampler.interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sampler.min_temp = -10.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sampler.max_temp = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_capacity_and_precision() {
        let mut config = Config::default();
        config.sampler.capacity = usize::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.sampler.capacity = MAX_CAPACITY;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.sampler.precision = 400;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.sampler.precision = MAX_PRECISION;
        assert!(config.validate().is_ok());
    }
}
