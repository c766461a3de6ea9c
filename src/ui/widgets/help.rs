//! Help panel widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Content of the bottom panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpPanel {
    pub source_url: String,
}

impl HelpPanel {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
        }
    }
}

/// Render the help panel
pub fn render_help(frame: &mut Frame, area: Rect, panel: &HelpPanel) {
    let block = Block::default()
        .title(" 👉 Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let help_text = vec![
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("q", key),
            Span::raw(", "),
            Span::styled("Esc", key),
            Span::raw(" or "),
            Span::styled("Ctrl+C", key),
            Span::raw(" to quit. Any other key redraws the screen."),
        ]),
        Line::from(vec![
            Span::raw("Data: "),
            Span::styled(panel.source_url.as_str(), Style::default().fg(Color::Gray)),
            Span::raw(" (https://github.com/disease-sh/API)"),
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
