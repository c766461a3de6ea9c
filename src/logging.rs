//! Tracing subscriber setup.
//!
//! Logs go to stderr unless a file is configured. The dashboard owns the
//! screen while it runs, so the default level only lets warnings through.

use crate::config::LoggingConfig;
use crate::error::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, EnvFilter};

/// Build the filter: `RUST_LOG` wins over the configured level
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Whether log lines share stderr with the error `main` reports on exit
pub fn writes_to_stderr(config: &LoggingConfig) -> bool {
    config.file.is_none()
}

/// Initialize the global subscriber. Must be called once.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), config.colored),
    };

    let builder = fmt()
        .with_env_filter(build_filter(config))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
