//! Terminal UI module using ratatui.
//!
//! This module renders the statistics as a fixed three-panel dashboard and
//! keeps it on screen until a quit key is pressed.

pub mod app;
pub mod input;
pub mod layout;
pub mod terminal;
pub mod widgets;

pub use app::Dashboard;
pub use input::TerminalEvents;
pub use layout::DisplayGrid;
