// Title bar - app name, version, and the configured service endpoint

use crate::config::VERSION;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            format!(" mailsort v{} ", VERSION),
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("- email triage", Style::default().fg(app.theme.dim)),
        Span::raw("  "),
        Span::styled(app.endpoint.as_str(), Style::default().fg(app.theme.dim)),
    ]);

    let title = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );

    f.render_widget(title, area);
}
