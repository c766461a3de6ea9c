//! Per-country statistics table.

use crate::stats::{format_percent, EntityRecord};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

pub const COLUMN_COUNT: usize = 10;

pub const HEADER: [&str; COLUMN_COUNT] = [
    "#",
    "Country",
    "Total Cases",
    "Cases (today)",
    "Total Deaths",
    "Deaths (today)",
    "Recoveries",
    "Active",
    "Critical",
    "Mortality",
];

/// Fixed character widths; cells are clipped or padded by the renderer
pub const COLUMN_WIDTHS: [u16; COLUMN_COUNT] = [5, 22, 20, 20, 18, 18, 15, 15, 15, 15];

/// Formatted table rows, header first
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTable {
    rows: Vec<[String; COLUMN_COUNT]>,
}

impl EntityTable {
    /// Format one row per record, keeping input order. The rank column is
    /// the 1-based position in `records`.
    pub fn from_records(records: &[EntityRecord]) -> Self {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(HEADER.map(String::from));
        rows.extend(
            records
                .iter()
                .enumerate()
                .map(|(i, record)| entity_row(i + 1, record)),
        );
        Self { rows }
    }

    /// All rows including the header
    pub fn rows(&self) -> &[[String; COLUMN_COUNT]] {
        &self.rows
    }

    pub fn header(&self) -> &[String; COLUMN_COUNT] {
        &self.rows[0]
    }

    pub fn body(&self) -> &[[String; COLUMN_COUNT]] {
        &self.rows[1..]
    }
}

fn entity_row(rank: usize, record: &EntityRecord) -> [String; COLUMN_COUNT] {
    [
        rank.to_string(),
        record.name.clone(),
        record.cases.to_string(),
        record.today_cases.to_string(),
        record.deaths.to_string(),
        record.today_deaths.to_string(),
        record.recovered.to_string(),
        record.active.to_string(),
        record.critical.to_string(),
        format_percent(record.mortality()),
    ]
}

fn centered_cells(row: &[String; COLUMN_COUNT]) -> Row<'_> {
    Row::new(
        row.iter()
            .map(|value| Cell::from(Text::from(value.as_str()).centered())),
    )
}

/// Render the country table
pub fn render_table(frame: &mut Frame, area: Rect, table: &EntityTable) {
    let header = centered_cells(table.header()).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let rows = table.body().iter().map(centered_cells);

    let block = Block::default()
        .title(format!(" Countries ({}) ", table.body().len()))
        .borders(Borders::TOP | Borders::BOTTOM);

    let widget = Table::new(rows, COLUMN_WIDTHS.map(Constraint::Length))
        .header(header)
        .style(Style::default().fg(Color::White))
        .block(block);

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EntityInfo;

    fn record(name: &str, id: u64, cases: u64, deaths: u64) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            cases,
            deaths,
            info: EntityInfo {
                id,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_list_has_header_only() {
        let table = EntityTable::from_records(&[]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.header()[1], "Country");
        assert!(table.body().is_empty());
    }

    #[test]
    fn test_rank_is_positional() {
        let records = [
            record("USA", 840, 100, 1),
            record("India", 356, 200, 2),
            record("France", 250, 300, 3),
        ];
        let table = EntityTable::from_records(&records);
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[2][0], "2");
        assert_eq!(table.rows()[2][1], "India");
        for (k, row) in table.rows().iter().enumerate().skip(1) {
            assert_eq!(row[0], k.to_string());
        }
    }

    #[test]
    fn test_row_cells() {
        let mut entity = record("Italy", 380, 200, 9);
        entity.today_cases = 4;
        entity.today_deaths = 1;
        entity.recovered = 150;
        entity.active = 41;
        entity.critical = 2;

        let table = EntityTable::from_records(&[entity]);
        assert_eq!(
            table.rows()[1],
            ["1", "Italy", "200", "4", "9", "1", "150", "41", "2", "4.50%"]
        );
    }

    #[test]
    fn test_mortality_without_cases() {
        let table = EntityTable::from_records(&[record("Vatican City", 336, 0, 0)]);
        assert_eq!(table.rows()[1][9], "n/a");
    }

    #[test]
    fn test_widths_cover_every_column() {
        assert_eq!(COLUMN_WIDTHS.len(), HEADER.len());
        assert_eq!(COLUMN_WIDTHS.iter().min(), Some(&COLUMN_WIDTHS[0]));
    }
}
