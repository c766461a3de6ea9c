//! Global statistics panel.
//!
//! The panel content is a fixed list of rows, each guarded by an inclusion
//! predicate, so the conditional lines can be checked without a terminal.

use crate::stats::{format_percent, AggregateSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Colour hint for a summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Infections,
    Deaths,
    Recoveries,
    Critical,
    Rate,
    Count,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Tone::Infections => Color::Blue,
            Tone::Deaths => Color::Red,
            Tone::Recoveries => Color::Green,
            Tone::Critical => Color::Yellow,
            Tone::Rate => Color::Cyan,
            Tone::Count => Color::Magenta,
        }
    }
}

/// One labelled line of the summary panel
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl SummaryLine {
    fn new(label: &'static str, value: String, tone: Tone) -> Self {
        Self { label, value, tone }
    }

    /// Plain text form, `label: value`
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

struct SummaryRow {
    include: fn(&AggregateSnapshot) -> bool,
    build: fn(&AggregateSnapshot) -> SummaryLine,
}

const SUMMARY_ROWS: [SummaryRow; 7] = [
    SummaryRow { include: always, build: infections },
    SummaryRow { include: always, build: deaths },
    SummaryRow { include: always, build: recoveries },
    SummaryRow { include: has_critical, build: critical },
    SummaryRow { include: always, build: infection_fatality },
    SummaryRow { include: always, build: case_fatality },
    SummaryRow { include: has_affected_regions, build: affected_regions },
];

pub fn always(_: &AggregateSnapshot) -> bool {
    true
}

pub fn has_critical(all: &AggregateSnapshot) -> bool {
    all.critical > 0
}

pub fn has_affected_regions(all: &AggregateSnapshot) -> bool {
    all.affected_countries > 0
}

fn infections(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new(
        "Infections",
        format!("{} ({} today)", all.cases, all.today_cases),
        Tone::Infections,
    )
}

fn deaths(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new(
        "Deaths",
        format!("{} ({} today)", all.deaths, all.today_deaths),
        Tone::Deaths,
    )
}

fn recoveries(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new(
        "Recoveries",
        format!("{} ({} remaining)", all.recovered, all.active),
        Tone::Recoveries,
    )
}

fn critical(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new(
        "Critical",
        format!("{} ({} of cases)", all.critical, format_percent(all.critical_share())),
        Tone::Critical,
    )
}

fn infection_fatality(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new("Mortality rate (IFR)", format_percent(all.ifr()), Tone::Rate)
}

fn case_fatality(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new("Mortality rate (CFR)", format_percent(all.cfr()), Tone::Rate)
}

fn affected_regions(all: &AggregateSnapshot) -> SummaryLine {
    SummaryLine::new(
        "Affected Countries",
        all.affected_countries.to_string(),
        Tone::Count,
    )
}

/// Build the summary lines in display order
pub fn summary_lines(all: &AggregateSnapshot) -> Vec<SummaryLine> {
    SUMMARY_ROWS
        .iter()
        .filter(|row| (row.include)(all))
        .map(|row| (row.build)(all))
        .collect()
}

/// Display-ready content of the global statistics panel
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPanel {
    pub title: String,
    pub lines: Vec<SummaryLine>,
}

impl SummaryPanel {
    pub fn new(all: &AggregateSnapshot) -> Self {
        let title = match all.updated_at() {
            Some(at) => format!(
                " 🌐 Global statistics · updated {} ",
                at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => " 🌐 Global statistics ".to_string(),
        };

        Self {
            title,
            lines: summary_lines(all),
        }
    }
}

/// Render the global statistics panel
pub fn render_summary(frame: &mut Frame, area: Rect, panel: &SummaryPanel) {
    let block = Block::default()
        .title(panel.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines: Vec<Line> = panel
        .lines
        .iter()
        .map(|line| {
            Line::from(vec![
                Span::styled(line.label, Style::default().fg(line.tone.color())),
                Span::raw(format!(": {}", line.value)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
