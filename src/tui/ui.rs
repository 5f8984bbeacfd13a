// Screen-level rendering
//
// Shell layout: title bar, view content, optional logs panel, status bar.
// The notice overlay renders last so it sits on top of everything.

use super::app::{App, View};
use super::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Main render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3), // title bar
        Constraint::Min(8),    // view content
    ];
    if app.show_logs {
        constraints.push(Constraint::Length(8)); // logs panel
    }
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);

    let content = chunks[1];
    match app.view {
        View::Compose => components::render_compose(f, content, app),
        View::Results => {
            // The results view only exists while a result does; a reset
            // flips the view back to Compose before clearing the result
            if let Some(ref result) = app.last_result {
                components::render_results(f, content, app, result);
            }
        }
    }

    if app.show_logs {
        components::render_logs(f, chunks[chunks.len() - 2], app);
    }

    components::render_status(f, chunks[chunks.len() - 1], app);

    // Notice overlay on top of the content area
    if let Some(ref notice) = app.notice {
        notice.render(f, content, &app.theme);
    }
}
