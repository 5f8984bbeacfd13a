//! Transient notice overlay
//!
//! One notice is visible at a time: an error (auto-dismissed after 5 s) or
//! a success acknowledgment such as the clipboard confirmation (2 s). A new
//! notice replaces the current one and restarts the clock; hiding a notice
//! drops its pending expiry with it.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// How long an error stays on screen before auto-dismissal.
pub const ERROR_TTL: Duration = Duration::from_secs(5);

/// How long the copy acknowledgment stays on screen.
pub const COPY_ACK_TTL: Duration = Duration::from_secs(2);

/// Visual variant of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// A message with a deadline.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    created_at: Instant,
    ttl: Duration,
}

impl Notice {
    /// An error notice with the standard 5-second window.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_ttl(message, NoticeKind::Error, ERROR_TTL)
    }

    /// The clipboard acknowledgment, reverting after ~2 seconds.
    pub fn copied() -> Self {
        Self::with_ttl("Copied!", NoticeKind::Success, COPY_ACK_TTL)
    }

    /// Construct with an explicit time-to-live (tests use short windows).
    pub fn with_ttl(message: impl Into<String>, kind: NoticeKind, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Whether the notice has outlived its window and should be removed.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Render as an overlay strip near the bottom of the area.
    ///
    /// Uses `Clear` so the notice sits on top of whatever is below it.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let color = match self.kind {
            NoticeKind::Error => theme.error,
            NoticeKind::Success => theme.success,
        };

        let width = (self.message.len() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.bottom().saturating_sub(height + 1);
        let notice_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(block);

        f.render_widget(Clear, notice_area);
        f.render_widget(text, notice_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_notice_expires_after_ttl() {
        let notice = Notice::with_ttl("oops", NoticeKind::Error, Duration::from_millis(50));
        assert!(!notice.is_expired());

        thread::sleep(Duration::from_millis(60));
        assert!(notice.is_expired());
    }

    #[test]
    fn test_replacement_restarts_the_clock() {
        let first = Notice::with_ttl("first", NoticeKind::Error, Duration::from_millis(50));
        thread::sleep(Duration::from_millis(40));

        // A new show supersedes the pending one; its window starts fresh
        let second = Notice::with_ttl("second", NoticeKind::Error, Duration::from_millis(50));
        thread::sleep(Duration::from_millis(20));

        assert!(first.is_expired());
        assert!(!second.is_expired());
        assert_eq!(second.message, "second");
    }

    #[test]
    fn test_error_and_copy_windows() {
        assert_eq!(ERROR_TTL, Duration::from_secs(5));
        assert_eq!(COPY_ACK_TTL, Duration::from_secs(2));
        assert_eq!(Notice::copied().kind, NoticeKind::Success);
    }
}
