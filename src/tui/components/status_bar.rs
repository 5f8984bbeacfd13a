// Status bar - submission state on the left, key hints on the right

use crate::tui::app::{App, InputMode, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(hints(app).len() as u16 + 1)])
        .split(area);

    // Left: mode + lifecycle state. The submit affordance is disabled for
    // the whole submitting window, and the hint text reflects that.
    let state = if app.submitting {
        Line::from(vec![
            Span::styled(
                format!(" {} ", app.mode.label()),
                Style::default().fg(app.theme.highlight),
            ),
            Span::styled(
                format!("Submitting {} ", app.spinner()),
                Style::default()
                    .fg(app.theme.status_bar)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!(" {} ", app.mode.label()),
                Style::default().fg(app.theme.highlight),
            ),
            Span::styled("Idle ", Style::default().fg(app.theme.status_bar)),
        ])
    };

    f.render_widget(Paragraph::new(state), chunks[0]);

    let hint_line = Paragraph::new(Line::from(Span::styled(
        hints(app),
        Style::default().fg(app.theme.dim),
    )))
    .alignment(Alignment::Right);

    f.render_widget(hint_line, chunks[1]);
}

fn hints(app: &App) -> &'static str {
    match app.view {
        View::Compose if app.submitting => "waiting for the service… ^l logs",
        View::Compose => match app.mode {
            InputMode::Text => "tab mode  ^s submit  ^r results  ^l logs  esc quit",
            InputMode::File => "tab mode  enter stage  ^s submit  ^x clear  ^l logs  esc quit",
        },
        View::Results => "y copy  n new analysis  ↑/↓ scroll  esc back  q quit",
    }
}
