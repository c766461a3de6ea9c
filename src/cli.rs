//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure using gumdrop. Every option is an
//! override on top of the configuration file.

use gumdrop::Options;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "covid-dashboard.toml";

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert LogLevel to a tracing filter string
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogLevel(String);

impl fmt::Display for UnknownLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown log level `{}` (expected trace, debug, info, warn or error)",
            self.0
        )
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

/// Worldwide coronavirus statistics for your terminal
#[derive(Debug, Options)]
pub struct Cli {
    #[options(help = "print help message")]
    pub help: bool,

    #[options(short = "V", help = "print version and exit")]
    pub version: bool,

    #[options(help = "path to configuration file", meta = "PATH", default = "covid-dashboard.toml")]
    pub config: PathBuf,

    #[options(help = "log level: trace, debug, info, warn, error", meta = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[options(help = "statistics service base URL (overrides config file)", meta = "URL")]
    pub api_url: Option<String>,

    #[options(help = "request timeout in seconds (overrides config file)", meta = "SECS")]
    pub timeout: Option<u64>,

    #[options(no_short, help = "print the effective configuration as TOML and exit")]
    pub print_config: bool,
}

impl Cli {
    /// Parse command-line arguments, exiting on `--help` or a parse error
    pub fn parse_args() -> Self {
        Self::parse_args_default_or_exit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Info.to_filter_string(), "info");
        assert_eq!(LogLevel::Debug.to_filter_string(), "debug");
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::parse_args_default::<&str>(&[]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.api_url, None);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_args_default(&[
            "--api-url",
            "http://localhost:3000",
            "-t",
            "5",
            "-l",
            "debug",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(cli.print_config);
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(Cli::parse_args_default(&["--timeout", "soon"]).is_err());
    }
}
