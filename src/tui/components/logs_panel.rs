// Logs panel - renders the captured tracing buffer
//
// Display-only: the newest entries that fit the panel height, one line
// each, truncated to the pane width.

use crate::logging::LogLevel;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.log_buffer.get_all();

    let visible = area.height.saturating_sub(2) as usize;
    let start = entries.len().saturating_sub(visible);
    let width = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = entries[start..]
        .iter()
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => Color::Red,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Info => app.theme.status_bar,
                LogLevel::Debug | LogLevel::Trace => app.theme.dim,
            };

            let text = format!(
                "{} {:5} {}: {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.level.as_str(),
                entry.target,
                entry.message
            );

            Line::from(Span::styled(
                truncate_to_width(&text, width),
                Style::default().fg(level_color),
            ))
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Logs (^l to hide) ")
            .border_style(Style::default().fg(app.theme.dim)),
    );

    f.render_widget(panel, area);
}

/// Truncate to a display width, respecting wide characters.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
    }

    #[test]
    fn test_truncate_respects_wide_characters() {
        // Each CJK glyph is two columns wide
        let truncated = truncate_to_width("日本語のログ", 5);
        assert!(truncated.width() <= 5);
        assert!(truncated.ends_with('\u{2026}'));
    }
}
