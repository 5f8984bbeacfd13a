// mailsort - terminal client for an email classification service
//
// The user types an email (or stages a .txt/.pdf file), submits it to the
// remote classifier, and reviews the category, confidence, and suggested
// reply - which can be copied straight to the clipboard.
//
// Architecture:
// - TUI (ratatui): form, results view, notices; single-threaded event loop
// - Client (reqwest): multipart POST /classify to the remote service
// - Validation: file format/size rules, applied before any request
// - Events: mpsc channel carrying submission outcomes back to the loop
// - Logging: tracing captured in-memory for the TUI's logs panel

mod cli;
mod client;
mod config;
mod events;
mod logging;
mod theme;
mod tui;
mod validate;

use anyhow::Result;
use clap::Parser;
use client::ClassifyClient;
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle subcommands first (config --show, --reset, --edit, --path)
    let args = cli::Cli::parse();
    if cli::handle_command(&args) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    // Initialize tracing. Logs are captured to an in-memory buffer so they
    // don't break through the TUI's alternate screen; optionally they also
    // go to rotating files.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("mailsort={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program so file
    // logs flush on exit
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = if config
        .logging
        .file_enabled
    {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender =
                    tracing_appender::rolling::daily(&config.logging.file_dir, "mailsort.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .with(
                        // JSON format for structured log parsing
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();

                Some(guard)
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
                None
            }
        }
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogLayer::new(log_buffer.clone()))
            .init();
        None
    };

    tracing::info!("mailsort v{} - service {}", config::VERSION, config.endpoint);

    let client = ClassifyClient::new(&config.endpoint);

    // One-shot reachability probe, log-only: the service may come up later,
    // and every submission carries its own error handling anyway
    {
        let probe = client.clone();
        tokio::spawn(async move {
            match probe.health().await {
                Ok(()) => tracing::debug!("Classification service is reachable"),
                Err(e) => tracing::warn!("Health probe failed: {}", e),
            }
        });
    }

    // Run the TUI in the main task; blocks until the user quits
    tui::run_tui(client, config, log_buffer).await
}
