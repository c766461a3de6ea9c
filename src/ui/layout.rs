//! Vertical stack layout and the composed dashboard grid.

use super::widgets::{
    render_help, render_summary, render_table, EntityTable, HelpPanel, SummaryPanel,
};
use crate::source::Snapshots;
use ratatui::{layout::Rect, Frame};

/// Row weights of the dashboard: summary, table, help
pub const ROW_WEIGHTS: [f64; 3] = [0.15, 0.70, 0.15];

// Keeps 0.15 * 40 from flooring to 5.
const ROUNDING_SLACK: f64 = 1e-9;

/// Split `area` into full-width rows whose heights follow `weights`.
///
/// Every row but the last gets `floor(height * weight / total)`; the last row
/// takes whatever height is left, so the rows always add up to `area.height`.
pub fn stack(area: Rect, weights: &[f64]) -> Vec<Rect> {
    let total: f64 = weights.iter().sum();
    let usable = total.is_finite() && total > 0.0;

    let mut rects = Vec::with_capacity(weights.len());
    let mut y = area.y;
    let mut remaining = area.height;

    for (i, weight) in weights.iter().enumerate() {
        let height = if i + 1 == weights.len() {
            remaining
        } else if usable && weight.is_finite() && *weight > 0.0 {
            ((f64::from(area.height) * weight / total + ROUNDING_SLACK).floor() as u16).min(remaining)
        } else {
            0
        };

        rects.push(Rect::new(area.x, y, area.width, height));
        y += height;
        remaining -= height;
    }

    rects
}

/// Content of one grid row
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Summary(SummaryPanel),
    Table(EntityTable),
    Help(HelpPanel),
}

impl Panel {
    fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Panel::Summary(panel) => render_summary(frame, area, panel),
            Panel::Table(table) => render_table(frame, area, table),
            Panel::Help(panel) => render_help(frame, area, panel),
        }
    }
}

/// A panel with its assigned rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPanel {
    pub area: Rect,
    pub panel: Panel,
}

/// The composed dashboard. Built once, then only redrawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGrid {
    area: Rect,
    panels: Vec<PlacedPanel>,
}

impl DisplayGrid {
    /// Stack `rows` top to bottom inside `area`
    pub fn compose(area: Rect, rows: Vec<(f64, Panel)>) -> Self {
        let weights: Vec<f64> = rows.iter().map(|(weight, _)| *weight).collect();
        let panels = stack(area, &weights)
            .into_iter()
            .zip(rows)
            .map(|(area, (_, panel))| PlacedPanel { area, panel })
            .collect();

        Self { area, panels }
    }

    /// Summary, country table and help, in that order
    pub fn dashboard(area: Rect, snapshots: &Snapshots, source_url: &str) -> Self {
        let [summary, table, help] = ROW_WEIGHTS;
        Self::compose(
            area,
            vec![
                (summary, Panel::Summary(SummaryPanel::new(&snapshots.aggregate))),
                (table, Panel::Table(EntityTable::from_records(&snapshots.entities))),
                (help, Panel::Help(HelpPanel::new(source_url))),
            ],
        )
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn panels(&self) -> &[PlacedPanel] {
        &self.panels
    }

    /// Draw every panel, clipped to the frame
    pub fn render(&self, frame: &mut Frame) {
        let bounds = frame.area();
        for placed in &self.panels {
            let area = placed.area.intersection(bounds);
            if !area.is_empty() {
                placed.panel.render(frame, area);
            }
        }
    }
}
