//! Worldwide COVID-19 statistics dashboard for the terminal.
//!
//! The program performs the following steps:
//! 1. Parses the command line and loads the configuration.
//! 2. Initializes logging.
//! 3. Takes over the terminal and draws the loading screen.
//! 4. Fetches the global and per-country statistics, one after the other.
//! 5. Composes the dashboard and redraws it on every key press until
//!    `q`, `Esc` or `Ctrl+C` is pressed.
//!
//! # Errors
//!
//! Any configuration, terminal, fetch or decode failure ends the program with
//! a non-zero status. The terminal is restored before the error is reported.

use anyhow::Result;

use covid_dashboard::cli::Cli;
use covid_dashboard::config::AppConfig;
use covid_dashboard::source::{load_snapshots, HttpSource};
use covid_dashboard::ui::{terminal, Dashboard, DisplayGrid, TerminalEvents};
use covid_dashboard::{error, logging};

fn run(config: &AppConfig) -> error::Result<()> {
    let source = HttpSource::new(&config.api)?;

    terminal::install_panic_hook();
    let (term, _guard) = terminal::setup_terminal()?;
    terminal::install_signal_handler()?;

    let mut dashboard = Dashboard::new(term, TerminalEvents);
    dashboard.show_loading()?;

    let snapshots = load_snapshots(&source)?;
    let grid = DisplayGrid::dashboard(dashboard.area()?, &snapshots, &config.api.base_url);

    dashboard.run(grid)?;
    tracing::info!("dashboard closed");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = AppConfig::load(&cli.config)?;
    config.apply_cli_overrides(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    logging::init(&config.logging)?;
    tracing::debug!(config = ?config, "configuration loaded");

    // `run` has dropped the terminal guard by the time an error gets here.
    // Returning the error prints it to stderr; a log file gets its own copy.
    if let Err(e) = run(&config) {
        if !logging::writes_to_stderr(&config.logging) {
            tracing::error!(error = %e, "fatal error");
        }
        return Err(e.into());
    }

    Ok(())
}
