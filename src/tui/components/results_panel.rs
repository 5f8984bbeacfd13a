// Results view - projection of a classification result
//
// Preview, reply, and timestamp are displayed verbatim. The category badge
// is a binary tag: the productive variant for a productive result, the
// unproductive variant for anything else. The confidence indicator shows
// its numeric label immediately while the gauge fill animates toward the
// target across ticks.

use crate::events::Classification;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn render_results(f: &mut Frame, area: Rect, app: &App, result: &Classification) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // email preview
            Constraint::Length(3), // badge + confidence gauge
            Constraint::Min(5),    // suggested response
            Constraint::Length(1), // timestamp line
        ])
        .split(area);

    render_preview(f, chunks[0], app, result);
    render_category_row(f, chunks[1], app, result);
    render_response(f, chunks[2], app, result);
    render_timestamp(f, chunks[3], app, result);
}

fn render_preview(f: &mut Frame, area: Rect, app: &App, result: &Classification) {
    let preview = Paragraph::new(result.email_preview.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Email preview ")
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(preview, area);
}

fn render_category_row(f: &mut Frame, area: Rect, app: &App, result: &Classification) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(20)])
        .split(area);

    let badge_color = if result.category.is_productive() {
        app.theme.badge_productive
    } else {
        app.theme.badge_unproductive
    };

    let badge = Paragraph::new(Line::from(Span::styled(
        result.category.label(),
        Style::default()
            .fg(badge_color)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Category ")
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(badge, row[0]);

    // Label reads the exact target; the ratio follows the animated fill
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confidence ")
                .border_style(Style::default().fg(app.theme.border)),
        )
        .gauge_style(Style::default().fg(app.theme.gauge_fill))
        .ratio(app.confidence_fill() / 100.0)
        .label(format!("{}%", result.confidence));
    f.render_widget(gauge, row[1]);
}

fn render_response(f: &mut Frame, area: Rect, app: &App, result: &Classification) {
    let response = Paragraph::new(result.suggested_response.as_str())
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Suggested response (y to copy) ")
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(response, area);
}

fn render_timestamp(f: &mut Frame, area: Rect, app: &App, result: &Classification) {
    // The timestamp string is the service's, shown as-is
    let line = Paragraph::new(Line::from(Span::styled(
        format!("Analyzed at {}", result.timestamp),
        Style::default().fg(app.theme.dim),
    )));
    f.render_widget(line, area);
}
