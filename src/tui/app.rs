// TUI application state
//
// The whole interaction surface is one `App` value plus an `Action` enum.
// The event loop translates key events into actions; `apply` performs the
// state transition and hands back at most one `Effect` (an HTTP submission
// or a clipboard write) for the loop to execute. Keeping transitions here,
// free of terminal and network handles, makes the controller testable
// without a live rendering surface.
//
// Submission lifecycle:
//   Idle -> Validating -> {Rejected(Idle) | Submitting}
//        -> {Rendered(Idle) | Failed(Idle)}
// Every path ends back in Idle; `finish_submission` drops the in-flight
// guard before it even looks at the outcome.

use super::components::notice::Notice;
use super::input::InputHandler;
use crate::client::{ClassificationRequest, ClassifyError};
use crate::config::Config;
use crate::events::Classification;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crate::validate::{self, SelectedFile};
use std::path::Path;

/// Which submission source is active. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Text => InputMode::File,
            InputMode::File => InputMode::Text,
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Text => "Typed text",
            InputMode::File => "File upload",
        }
    }
}

/// Screens the TUI can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Compose,
    Results,
}

/// A user action, produced by the key-dispatch table in `tui::mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchMode(InputMode),
    TypeChar(char),
    Backspace,
    Newline,
    /// Validate and stage the file named in the path input
    StageFile,
    ClearFile,
    Submit,
    CopyResponse,
    NewAnalysis,
    /// Leave the results screen, keeping the last result around
    CloseResults,
    /// Return to the results screen if a result exists
    OpenResults,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ToggleLogs,
    Quit,
}

/// A side effect the event loop must execute after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the HTTP submission with this payload
    Submit(ClassificationRequest),
    /// Copy this text to the system clipboard
    Copy(String),
}

/// How far the confidence fill moves per tick, in percentage points.
/// At the 200 ms tick rate a full sweep takes under two seconds.
const FILL_STEP: f64 = 12.0;

/// Ticks to hold the fill at zero before it starts moving, so the rise is
/// visible rather than an instant jump.
const FILL_DELAY_TICKS: u8 = 1;

/// Spinner frames for the submitting indicator
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Main application state
pub struct App {
    /// Active submission source
    pub mode: InputMode,

    /// Current screen
    pub view: View,

    /// Typed email text (Text mode staging)
    pub email_text: String,

    /// Path being typed in the file pane
    pub path_input: String,

    /// Staged file, already validated (File mode staging)
    pub selected_file: Option<SelectedFile>,

    /// In-flight guard: true from submit until the outcome lands
    pub submitting: bool,

    /// The single transient notice slot (error or copy acknowledgment)
    pub notice: Option<Notice>,

    /// Most recent classification; cleared on "new analysis"
    pub last_result: Option<Classification>,

    /// Animated gauge fill, 0..=100; converges to the result's confidence
    confidence_fill: f64,

    /// Remaining ticks before the fill starts moving
    fill_delay_ticks: u8,

    /// Scroll offset in the results view
    pub results_scroll: u16,

    /// Whether the logs panel is shown
    pub show_logs: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Current spinner frame while submitting
    spinner_frame: usize,

    /// Color palette
    pub theme: Theme,

    /// Service endpoint, shown in the title bar
    pub endpoint: String,

    /// Captured log entries for the logs panel
    pub log_buffer: LogBuffer,

    /// Command-key behavior tracking
    input_handler: InputHandler,
}

impl App {
    pub fn new(log_buffer: LogBuffer, config: &Config) -> Self {
        Self {
            mode: InputMode::default(),
            view: View::default(),
            email_text: String::new(),
            path_input: String::new(),
            selected_file: None,
            submitting: false,
            notice: None,
            last_result: None,
            confidence_fill: 0.0,
            fill_delay_ticks: 0,
            results_scroll: 0,
            show_logs: false,
            should_quit: false,
            spinner_frame: 0,
            theme: Theme::by_name(&config.theme),
            endpoint: config.endpoint.clone(),
            log_buffer,
            input_handler: InputHandler::default(),
        }
    }

    /// Apply one action; returns the side effect the caller must run, if any.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SwitchMode(mode) => {
                // Mode switch is user intent to retry cleanly: always drop
                // the visible error. Staged data of both modes survives;
                // only the active mode's data is eligible for submission.
                self.mode = mode;
                self.clear_error();
                None
            }
            Action::TypeChar(c) => {
                match self.mode {
                    InputMode::Text => self.email_text.push(c),
                    InputMode::File => self.path_input.push(c),
                }
                None
            }
            Action::Backspace => {
                match self.mode {
                    InputMode::Text => {
                        self.email_text.pop();
                    }
                    InputMode::File => {
                        self.path_input.pop();
                    }
                }
                None
            }
            Action::Newline => {
                if self.mode == InputMode::Text {
                    self.email_text.push('\n');
                }
                None
            }
            Action::StageFile => {
                self.stage_file();
                None
            }
            Action::ClearFile => {
                self.clear_file();
                None
            }
            Action::Submit => self.start_submission(),
            Action::CopyResponse => self
                .last_result
                .as_ref()
                .map(|r| Effect::Copy(r.suggested_response.clone())),
            Action::NewAnalysis => {
                self.reset_for_new_analysis();
                None
            }
            Action::CloseResults => {
                self.view = View::Compose;
                None
            }
            Action::OpenResults => {
                if self.last_result.is_some() {
                    self.view = View::Results;
                }
                None
            }
            Action::ScrollUp => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.results_scroll = self.results_scroll.saturating_add(1);
                None
            }
            Action::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(10);
                None
            }
            Action::PageDown => {
                self.results_scroll = self.results_scroll.saturating_add(10);
                None
            }
            Action::ToggleLogs => {
                self.show_logs = !self.show_logs;
                None
            }
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    /// Validate the typed path and stage the file.
    ///
    /// On success the file-info line refreshes and any error clears; on
    /// failure the staged file and the path input reset, mirroring a
    /// browser clearing a rejected file picker.
    fn stage_file(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }

        match validate::validate_path(Path::new(&path)) {
            Ok(file) => {
                tracing::debug!("Staged {}", file.info_line());
                self.selected_file = Some(file);
                self.clear_error();
            }
            Err(e) => {
                self.selected_file = None;
                self.path_input.clear();
                self.show_error(e.to_string());
            }
        }
    }

    /// Drop the staged file and its info display. Idempotent.
    fn clear_file(&mut self) {
        self.selected_file = None;
        self.path_input.clear();
    }

    /// Check preconditions and, if they pass, enter the submitting state.
    ///
    /// Preconditions run in order and each failure produces its own error
    /// without any request being built. While a submission is in flight
    /// this is a no-op - the guard enforces at most one request at a time.
    fn start_submission(&mut self) -> Option<Effect> {
        if self.submitting {
            return None;
        }

        let request = match self.mode {
            InputMode::Text => {
                let text = self.email_text.trim();
                if text.is_empty() {
                    self.show_error("Please enter the email content");
                    return None;
                }
                ClassificationRequest::Text(text.to_string())
            }
            InputMode::File => match &self.selected_file {
                Some(file) => ClassificationRequest::File(file.clone()),
                None => {
                    self.show_error("Please select a file");
                    return None;
                }
            },
        };

        self.submitting = true;
        self.view = View::Compose; // hide any previously shown results
        self.notice = None;

        Some(Effect::Submit(request))
    }

    /// Adopt the outcome of a completed submission.
    ///
    /// The guard is released first, unconditionally - whichever way the
    /// request ended, the submit control is usable again.
    pub fn finish_submission(&mut self, outcome: Result<Classification, ClassifyError>) {
        self.submitting = false;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    "Classified as {} ({}%)",
                    result.category.label(),
                    result.confidence
                );
                self.confidence_fill = 0.0;
                self.fill_delay_ticks = FILL_DELAY_TICKS;
                self.results_scroll = 0;
                self.last_result = Some(result);
                self.view = View::Results;
            }
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                self.show_error(e.user_message());
            }
        }
    }

    /// Reset to a fresh Idle state: empty text, no staged file, no result.
    fn reset_for_new_analysis(&mut self) {
        self.email_text.clear();
        self.clear_file();
        self.last_result = None;
        self.confidence_fill = 0.0;
        self.fill_delay_ticks = 0;
        self.results_scroll = 0;
        self.notice = None;
        self.view = View::Compose;
    }

    /// Advance time-driven state: notice expiry, spinner, gauge animation.
    /// Called on every event-loop tick.
    pub fn tick(&mut self) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired()) {
            self.notice = None;
        }

        if self.submitting {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }

        if self.view == View::Results {
            if let Some(target) = self.last_result.as_ref().map(|r| r.confidence as f64) {
                if self.fill_delay_ticks > 0 {
                    self.fill_delay_ticks -= 1;
                } else if self.confidence_fill < target {
                    // Step toward the target and land on it exactly
                    self.confidence_fill = (self.confidence_fill + FILL_STEP).min(target);
                }
            }
        }
    }

    /// Current fill of the confidence gauge, 0..=100
    pub fn confidence_fill(&self) -> f64 {
        self.confidence_fill
    }

    /// Spinner glyph for the submitting indicator
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Replace any visible notice with an error; its 5 s window starts now.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message));
    }

    /// Show the transient clipboard acknowledgment.
    pub fn acknowledge_copy(&mut self) {
        self.notice = Some(Notice::copied());
    }

    /// Dismiss a visible error (and its pending auto-dismiss) immediately.
    fn clear_error(&mut self) {
        use super::components::notice::NoticeKind;
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.kind == NoticeKind::Error)
        {
            self.notice = None;
        }
    }

    /// Handle a key press through the command-key handler.
    /// Returns true if the action should be triggered.
    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    /// Handle a key release
    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input_handler.handle_key_release(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Category;
    use std::io::Write;
    use std::path::PathBuf;

    fn test_app() -> App {
        App::new(LogBuffer::new(), &Config::default())
    }

    fn sample_result(confidence: u8) -> Classification {
        serde_json::from_value(serde_json::json!({
            "email_preview": "Preciso de ajuda com login",
            "category": "Produtivo",
            "confidence": confidence,
            "suggested_response": "Prezado(a), nossa equipe ja esta verificando.",
            "timestamp": "2025-01-15 09:30:00"
        }))
        .unwrap()
    }

    fn write_temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_switch_mode_clears_error() {
        let mut app = test_app();
        app.show_error("boom");

        app.apply(Action::SwitchMode(InputMode::File));
        assert!(app.notice.is_none());
        assert_eq!(app.mode, InputMode::File);
    }

    #[test]
    fn test_switch_mode_to_active_mode_still_clears_error() {
        let mut app = test_app();
        app.show_error("boom");

        // Idempotent beyond re-clearing the error
        app.apply(Action::SwitchMode(InputMode::Text));
        assert!(app.notice.is_none());
        assert_eq!(app.mode, InputMode::Text);
    }

    #[test]
    fn test_switch_mode_keeps_staged_data_of_both_modes() {
        let mut app = test_app();
        app.email_text = "draft".to_string();
        let path = write_temp_file("mailsort_switch_keep.txt", b"hello");
        app.path_input = path.display().to_string();
        app.apply(Action::StageFile);
        assert!(app.selected_file.is_some());

        app.apply(Action::SwitchMode(InputMode::Text));
        app.apply(Action::SwitchMode(InputMode::File));

        assert_eq!(app.email_text, "draft");
        assert!(app.selected_file.is_some());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_typing_targets_the_active_mode() {
        let mut app = test_app();
        app.apply(Action::TypeChar('h'));
        app.apply(Action::TypeChar('i'));
        app.apply(Action::Newline);

        app.apply(Action::SwitchMode(InputMode::File));
        app.apply(Action::TypeChar('a'));
        app.apply(Action::Backspace);
        app.apply(Action::TypeChar('b'));
        // Newline never lands in the path input
        app.apply(Action::Newline);

        assert_eq!(app.email_text, "hi\n");
        assert_eq!(app.path_input, "b");
    }

    #[test]
    fn test_submit_empty_text_rejects_without_request() {
        let mut app = test_app();
        app.email_text = "   \n  ".to_string(); // whitespace only

        let effect = app.apply(Action::Submit);

        assert!(effect.is_none());
        assert!(!app.submitting);
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Please enter the email content"
        );
    }

    #[test]
    fn test_submit_file_mode_without_staged_file_rejects() {
        let mut app = test_app();
        app.apply(Action::SwitchMode(InputMode::File));

        let effect = app.apply(Action::Submit);

        assert!(effect.is_none());
        assert!(!app.submitting);
        assert_eq!(app.notice.as_ref().unwrap().message, "Please select a file");
    }

    #[test]
    fn test_submit_uses_only_the_active_mode() {
        // A staged file does not make an empty Text submission valid
        let mut app = test_app();
        let path = write_temp_file("mailsort_active_mode.txt", b"hello");
        app.apply(Action::SwitchMode(InputMode::File));
        app.path_input = path.display().to_string();
        app.apply(Action::StageFile);
        app.apply(Action::SwitchMode(InputMode::Text));

        let effect = app.apply(Action::Submit);
        assert!(effect.is_none());
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Please enter the email content"
        );

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_submit_text_trims_and_enters_submitting() {
        let mut app = test_app();
        app.email_text = "  Preciso de ajuda com login  ".to_string();
        app.show_error("stale");

        let effect = app.apply(Action::Submit);

        assert_eq!(
            effect,
            Some(Effect::Submit(ClassificationRequest::Text(
                "Preciso de ajuda com login".to_string()
            )))
        );
        assert!(app.submitting);
        assert!(app.notice.is_none());
        assert_eq!(app.view, View::Compose);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_a_noop() {
        let mut app = test_app();
        app.email_text = "hello".to_string();

        assert!(app.apply(Action::Submit).is_some());
        assert!(app.apply(Action::Submit).is_none());
        assert!(app.submitting);
    }

    #[test]
    fn test_finish_success_releases_guard_and_shows_results() {
        let mut app = test_app();
        app.email_text = "hello".to_string();
        app.apply(Action::Submit);

        app.finish_submission(Ok(sample_result(92)));

        assert!(!app.submitting);
        assert_eq!(app.view, View::Results);
        let result = app.last_result.as_ref().unwrap();
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.confidence, 92);
        // Label is immediate; the fill starts at zero and animates up
        assert_eq!(app.confidence_fill(), 0.0);
    }

    #[test]
    fn test_finish_failure_releases_guard_and_keeps_results_hidden() {
        let mut app = test_app();
        app.email_text = "hello".to_string();
        app.apply(Action::Submit);

        app.finish_submission(Err(ClassifyError::Service("internal failure".to_string())));

        assert!(!app.submitting);
        assert_eq!(app.view, View::Compose);
        assert!(app.last_result.is_none());
        assert_eq!(app.notice.as_ref().unwrap().message, "internal failure");

        // Submit control is usable again
        assert!(app.apply(Action::Submit).is_some());
    }

    #[test]
    fn test_confidence_fill_converges_exactly() {
        for confidence in [0u8, 1, 37, 92, 100] {
            let mut app = test_app();
            app.email_text = "hello".to_string();
            app.apply(Action::Submit);
            app.finish_submission(Ok(sample_result(confidence)));

            // First tick consumes the start delay, the rest animate
            for _ in 0..20 {
                app.tick();
            }

            assert_eq!(app.confidence_fill(), confidence as f64, "c={confidence}");
        }
    }

    #[test]
    fn test_fill_waits_for_the_start_delay() {
        let mut app = test_app();
        app.email_text = "hello".to_string();
        app.apply(Action::Submit);
        app.finish_submission(Ok(sample_result(92)));

        app.tick(); // consumes the delay
        assert_eq!(app.confidence_fill(), 0.0);

        app.tick(); // first movement
        assert!(app.confidence_fill() > 0.0);
    }

    #[test]
    fn test_copy_response_only_with_a_result() {
        let mut app = test_app();
        assert!(app.apply(Action::CopyResponse).is_none());

        app.email_text = "hello".to_string();
        app.apply(Action::Submit);
        app.finish_submission(Ok(sample_result(92)));

        let effect = app.apply(Action::CopyResponse).unwrap();
        assert_eq!(
            effect,
            Effect::Copy("Prezado(a), nossa equipe ja esta verificando.".to_string())
        );
    }

    #[test]
    fn test_new_analysis_resets_to_idle() {
        let mut app = test_app();
        app.email_text = "hello".to_string();
        app.apply(Action::Submit);
        app.finish_submission(Ok(sample_result(92)));
        app.path_input = "leftover".to_string();

        app.apply(Action::NewAnalysis);

        assert!(app.email_text.is_empty());
        assert!(app.path_input.is_empty());
        assert!(app.selected_file.is_none());
        assert!(app.last_result.is_none());
        assert!(app.notice.is_none());
        assert!(!app.submitting);
        assert_eq!(app.view, View::Compose);
    }

    #[test]
    fn test_close_results_keeps_last_result() {
        let mut app = test_app();
        app.email_text = "hello".to_string();
        app.apply(Action::Submit);
        app.finish_submission(Ok(sample_result(92)));

        app.apply(Action::CloseResults);
        assert_eq!(app.view, View::Compose);
        assert!(app.last_result.is_some());

        app.apply(Action::OpenResults);
        assert_eq!(app.view, View::Results);
    }

    #[test]
    fn test_open_results_without_result_is_a_noop() {
        let mut app = test_app();
        app.apply(Action::OpenResults);
        assert_eq!(app.view, View::Compose);
    }

    #[test]
    fn test_stage_valid_file_refreshes_info_and_clears_error() {
        let mut app = test_app();
        app.show_error("stale");
        app.apply(Action::SwitchMode(InputMode::File));
        app.show_error("stale again");

        let path = write_temp_file("mailsort_stage_ok.txt", b"hello world");
        app.path_input = path.display().to_string();
        app.apply(Action::StageFile);

        let staged = app.selected_file.as_ref().unwrap();
        assert_eq!(staged.name, "mailsort_stage_ok.txt");
        assert_eq!(staged.size_bytes, 11);
        assert_eq!(staged.info_line(), "mailsort_stage_ok.txt (11 Bytes)");
        assert!(app.notice.is_none());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_stage_unsupported_format_rejects_and_resets_input() {
        let mut app = test_app();
        app.apply(Action::SwitchMode(InputMode::File));

        let path = write_temp_file("mailsort_stage_bad.docx", b"hello");
        app.path_input = path.display().to_string();
        app.apply(Action::StageFile);

        assert!(app.selected_file.is_none());
        assert!(app.path_input.is_empty());
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Unsupported file format. Use .txt or .pdf"
        );

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_stage_replaces_previous_selection() {
        let mut app = test_app();
        app.apply(Action::SwitchMode(InputMode::File));

        let first = write_temp_file("mailsort_stage_first.txt", b"one");
        app.path_input = first.display().to_string();
        app.apply(Action::StageFile);

        let second = write_temp_file("mailsort_stage_second.txt", b"three");
        app.path_input = second.display().to_string();
        app.apply(Action::StageFile);

        assert_eq!(
            app.selected_file.as_ref().unwrap().name,
            "mailsort_stage_second.txt"
        );

        std::fs::remove_file(first).unwrap();
        std::fs::remove_file(second).unwrap();
    }

    #[test]
    fn test_clear_file_is_idempotent() {
        let mut app = test_app();
        let path = write_temp_file("mailsort_clear.txt", b"hello");
        app.apply(Action::SwitchMode(InputMode::File));
        app.path_input = path.display().to_string();
        app.apply(Action::StageFile);
        assert!(app.selected_file.is_some());

        app.apply(Action::ClearFile);
        assert!(app.selected_file.is_none());
        assert!(app.path_input.is_empty());

        // Second clear produces the same empty state
        app.apply(Action::ClearFile);
        assert!(app.selected_file.is_none());
        assert!(app.path_input.is_empty());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_new_error_supersedes_the_visible_one() {
        let mut app = test_app();
        app.show_error("first");
        app.show_error("second");
        assert_eq!(app.notice.as_ref().unwrap().message, "second");
    }
}
