//! Placeholder shown while the statistics are fetched.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BANNER: [&str; 5] = [
    r"                 _     _ ",
    r"  ___ _____   __(_) __| |",
    r" / __/ _ \ \ / /| |/ _` |",
    r"| (_| (_) \ V / | | (_| |",
    r" \___\___/ \_/  |_|\__,_|",
];

pub const TAGLINE: &str = "Worldwide Coronavirus (COVID-19) Statistics for your terminal";

pub const WAIT_NOTICE: &str = "Please wait until information is loading";

/// Render the full-area loading placeholder
pub fn render_loading(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(BANNER.iter().map(|row| Line::from(*row)));
    lines.push(Line::from(""));
    lines.push(Line::from(TAGLINE));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        WAIT_NOTICE,
        Style::default().fg(Color::Black).bg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
