//! UI widgets for displaying the statistics.

pub mod help;
pub mod loading;
pub mod summary;
pub mod table;

pub use help::{render_help, HelpPanel};
pub use loading::render_loading;
pub use summary::{render_summary, SummaryPanel};
pub use table::{render_table, EntityTable};
