// TUI module - Terminal User Interface
//
// Owns the terminal lifecycle and the event loop:
// - Terminal initialization and cleanup (raw mode, alternate screen)
// - Event loop: keyboard input, timer ticks, submission completions
// - Key -> Action dispatch
// - Executing the effects transitions hand back (HTTP submission task,
//   clipboard write)

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod ui;

use crate::client::ClassifyClient;
use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{Action, App, Effect, InputMode, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// the way out - including when the loop itself errors.
pub async fn run_tui(client: ClassifyClient, config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(log_buffer, &config);

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Three event sources feed the loop:
/// 1. Keyboard input (form editing and commands)
/// 2. Timer ticks (notice expiry, spinner, gauge animation)
/// 3. Completed submissions, reported by their spawned tasks
///
/// All state mutation happens here, on one task; the submission task only
/// owns its request and the channel sender.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: ClassifyClient,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(16);
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event, &client, &event_tx);
                    }
                }
            } => {}

            // Periodic tick
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Submission completions
            Some(app_event) = event_rx.recv() => {
                match app_event {
                    AppEvent::SubmissionFinished(outcome) => app.finish_submission(outcome),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Translate a key event into an action and run the resulting transition.
fn handle_key_event(
    app: &mut App,
    key_event: KeyEvent,
    client: &ClassifyClient,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match key_event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return;
        }
        _ => return,
    }

    let Some(action) = action_for_key(app, key_event) else {
        return;
    };

    if let Some(effect) = app.apply(action) {
        run_effect(app, effect, client, event_tx);
    }
}

/// The key -> action dispatch table.
///
/// Layered dispatch: chords first (work everywhere), then view-specific
/// keys. Command keys are gated through the input handler so they trigger
/// once per press; plain typing goes straight to the buffer so the
/// terminal's autorepeat works.
fn action_for_key(app: &mut App, key_event: KeyEvent) -> Option<Action> {
    let key = key_event.code;

    // Chords work regardless of view
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('l') => app.handle_key_press(key).then_some(Action::ToggleLogs),
            KeyCode::Char('s') => app.handle_key_press(key).then_some(Action::Submit),
            KeyCode::Char('x') => app.handle_key_press(key).then_some(Action::ClearFile),
            KeyCode::Char('r') => app.handle_key_press(key).then_some(Action::OpenResults),
            _ => None,
        };
    }

    match app.view {
        View::Compose => match key {
            KeyCode::Tab | KeyCode::BackTab => app
                .handle_key_press(key)
                .then_some(Action::SwitchMode(app.mode.toggled())),
            KeyCode::Enter => app.handle_key_press(key).then(|| match app.mode {
                InputMode::Text => Action::Newline,
                InputMode::File => Action::StageFile,
            }),
            KeyCode::Esc => app.handle_key_press(key).then_some(Action::Quit),
            // Editing keys bypass the handler: autorepeat drives them
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::TypeChar(c)),
            _ => None,
        },
        View::Results => match key {
            KeyCode::Char('y') => app.handle_key_press(key).then_some(Action::CopyResponse),
            KeyCode::Char('n') => app.handle_key_press(key).then_some(Action::NewAnalysis),
            KeyCode::Char('q') => app.handle_key_press(key).then_some(Action::Quit),
            KeyCode::Esc => app.handle_key_press(key).then_some(Action::CloseResults),
            KeyCode::Up => app.handle_key_press(key).then_some(Action::ScrollUp),
            KeyCode::Down => app.handle_key_press(key).then_some(Action::ScrollDown),
            KeyCode::PageUp => app.handle_key_press(key).then_some(Action::PageUp),
            KeyCode::PageDown => app.handle_key_press(key).then_some(Action::PageDown),
            _ => None,
        },
    }
}

/// Execute a side effect produced by a transition.
fn run_effect(app: &mut App, effect: Effect, client: &ClassifyClient, event_tx: &mpsc::Sender<AppEvent>) {
    match effect {
        Effect::Submit(request) => {
            tracing::info!("Submitting {}", request.describe());
            let client = client.clone();
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                // The task reports exactly one outcome whichever way the
                // request ends; receiving it is what releases the submit
                // guard.
                let outcome = client.classify(request).await;
                let _ = event_tx.send(AppEvent::SubmissionFinished(outcome)).await;
            });
        }
        Effect::Copy(text) => clipboard::copy_and_notify(app, &text),
    }
}
