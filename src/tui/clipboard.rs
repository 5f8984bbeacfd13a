//! Clipboard helper for the suggested-response copy action
//!
//! Uses `arboard` for cross-platform support. A fresh clipboard handle is
//! created per copy so no resource is held between presses. Failures are
//! never silent: they surface through the notice slot like any other error,
//! without touching submission state.

use super::app::App;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard.
///
/// Common failure cases: no display server (headless Linux), clipboard
/// access denied by the desktop environment.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Copy the given suggested-response text and record the outcome on the app:
/// a transient acknowledgment on success, an error notice on failure.
pub fn copy_and_notify(app: &mut App, text: &str) {
    match copy_to_clipboard(text) {
        Ok(()) => {
            tracing::debug!("Copied suggested response ({} chars)", text.len());
            app.acknowledge_copy();
        }
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            app.show_error("Could not copy the response to the clipboard");
        }
    }
}
