//! Worldwide COVID-19 statistics for the terminal.
//!
//! The crate fetches a global snapshot and a per-country list from the
//! disease.sh API, formats them into a summary panel and a table, and keeps
//! the resulting dashboard on screen until the user quits.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod stats;
pub mod ui;
