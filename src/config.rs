//! Application configuration management.
//!
//! This module handles loading, layering and validating the application
//! configuration: built-in defaults, an optional TOML file, environment
//! variables and finally CLI overrides.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `COVID_DASHBOARD__API__TIMEOUT_SECS`
const ENV_PREFIX: &str = "COVID_DASHBOARD";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level application configuration
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Statistics service configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub aggregate_path: String,
    pub entities_path: String,
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub json: bool,
    pub colored: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://disease.sh/v3/covid-19".to_string(),
            aggregate_path: "all".to_string(),
            entities_path: "countries".to_string(),
            timeout_secs: 30,
        }
    }
}

// Anything below warn would be written over the dashboard unless a file is set.
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            json: false,
            colored: true,
        }
    }
}

impl ApiConfig {
    /// Full URL of the aggregate endpoint
    pub fn aggregate_url(&self) -> String {
        join_url(&self.base_url, &self.aggregate_path)
    }

    /// Full URL of the per-entity endpoint
    pub fn entities_url(&self) -> String {
        join_url(&self.base_url, &self.entities_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_env(path.as_ref(), environment())
    }

    fn load_with_env(path: &Path, env: ::config::Environment) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(env)
            .build()
            .map_err(ConfigError::ReadError)?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(ConfigError::ReadError)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than 0"));
        }

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(invalid("api.base_url", "must be an http:// or https:// URL"));
        }

        if self.api.aggregate_path.trim().is_empty() {
            return Err(invalid("api.aggregate_path", "cannot be empty"));
        }

        if self.api.entities_path.trim().is_empty() {
            return Err(invalid("api.entities_path", "cannot be empty"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) -> Result<()> {
        if let Some(url) = &cli.api_url {
            self.api.base_url = url.clone();
        }

        if let Some(timeout) = cli.timeout {
            self.api.timeout_secs = timeout;
        }

        if let Some(level) = cli.log_level {
            self.logging.level = level.to_filter_string().to_string();
        }

        self.validate()
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn invalid(field: &str, message: &str) -> crate::error::AppError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://disease.sh/v3/covid-19");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let mut config = ApiConfig::default();
        config.base_url = "http://localhost:8080/v3/covid-19/".to_string();
        assert_eq!(config.aggregate_url(), "http://localhost:8080/v3/covid-19/all");
        assert_eq!(
            config.entities_url(),
            "http://localhost:8080/v3/covid-19/countries"
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "disease.sh".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\ntimeout_secs = 5\n\n[logging]\nfile = \"dash.log\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.aggregate_path, "all");
        assert_eq!(config.logging.file.as_deref(), Some("dash.log"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\ntimeout_secs = 0").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }

    fn env(vars: &[(&str, &str)]) -> ::config::Environment {
        let vars: ::config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\ntimeout_secs = 20\nentities_path = \"states\"").unwrap();

        let config = AppConfig::load_with_env(
            file.path(),
            env(&[
                ("COVID_DASHBOARD__API__TIMEOUT_SECS", "5"),
                ("COVID_DASHBOARD__LOGGING__LEVEL", "debug"),
                ("OTHER_APP__API__TIMEOUT_SECS", "99"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.entities_path, "states");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_value_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_with_env(
            &dir.path().join("absent.toml"),
            env(&[("COVID_DASHBOARD__API__TIMEOUT_SECS", "0")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_to_toml_renders_sections() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[api]"));
        assert!(rendered.contains("base_url = \"https://disease.sh/v3/covid-19\""));
    }
}
