// Compose view - the submission form
//
// A tab row picks the active input mode; below it, either the email text
// editor or the file pane is visible. Only the active pane's content is
// eligible for submission.

use crate::tui::app::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Cursor glyph appended to the focused input
const CURSOR: &str = "\u{258f}";

pub fn render_compose(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    render_tabs(f, chunks[0], app);

    match app.mode {
        InputMode::Text => render_text_pane(f, chunks[1], app),
        InputMode::File => render_file_pane(f, chunks[1], app),
    }
}

/// Mode tabs, the active one highlighted
fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let tab = |mode: InputMode| {
        let style = if app.mode == mode {
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.dim)
        };
        Span::styled(format!(" {} ", mode.label()), style)
    };

    let line = Line::from(vec![
        tab(InputMode::Text),
        Span::styled("\u{2502}", Style::default().fg(app.theme.border)),
        tab(InputMode::File),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn render_text_pane(f: &mut Frame, area: Rect, app: &App) {
    let mut text = app.email_text.clone();
    if !app.submitting {
        text.push_str(CURSOR);
    }

    let editor = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Email content ")
                .border_style(Style::default().fg(app.theme.border)),
        );

    f.render_widget(editor, area);
}

fn render_file_pane(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Path: ", Style::default().fg(app.theme.dim)),
            Span::raw(app.path_input.clone()),
            Span::styled(CURSOR, Style::default().fg(app.theme.highlight)),
        ]),
        Line::raw(""),
    ];

    // File-info display: present exactly while a file is staged
    match &app.selected_file {
        Some(file) => {
            lines.push(Line::from(vec![
                Span::styled("\u{2713} ", Style::default().fg(app.theme.success)),
                Span::styled(
                    file.info_line(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("   ^x to clear", Style::default().fg(app.theme.dim)),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Type a path to a .txt or .pdf file (max 16MB) and press enter",
                Style::default().fg(app.theme.dim),
            )));
        }
    }

    let pane = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" File ")
            .border_style(Style::default().fg(app.theme.border)),
    );

    f.render_widget(pane, area);
}
