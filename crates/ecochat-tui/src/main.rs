mod app;
mod handler;
mod tui;
mod ui;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ecochat_core::{ChatClient, ChatSession, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "ecochat")]
#[command(about = "Terminal chat client for environmental awareness questions")]
struct Cli {
    /// Base URL of the chat backend (overrides ECOCHAT_SERVER_URL and the config file)
    #[arg(long)]
    server_url: Option<String>,
    /// Channel to open on start (general, climate, water, ...)
    #[arg(short, long)]
    channel: Option<String>,
    /// Minimum delay between revealed characters, in milliseconds
    #[arg(long)]
    min_delay: Option<u64>,
    /// Maximum delay between revealed characters, in milliseconds
    #[arg(long)]
    max_delay: Option<u64>,
    /// Where to write the log (defaults to the local data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_config: bool,
}

const LOG_FILE_NAME: &str = "ecochat.log";

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ecochat")
}

/// Directory and file name prefix for the rolling log.
fn log_location(path: Option<&Path>) -> (PathBuf, String) {
    let Some(path) = path else {
        return (default_log_dir(), LOG_FILE_NAME.to_string());
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE_NAME.to_string());
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, file_name)
}

/// Log to a daily rolling file; the terminal belongs to the UI.
///
/// The returned guard flushes the background writer when dropped, so it has
/// to outlive the UI.
fn init_logging(path: Option<&Path>) -> Result<(PathBuf, WorkerGuard)> {
    let (log_dir, file_name) = log_location(path);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, &file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env("ECOCHAT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("ecochat=info,ecochat_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    Ok((log_dir.join(file_name), guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Held until after the terminal is restored so buffered lines are flushed
    let (log_path, _log_guard) = init_logging(cli.log_file.as_deref())?;

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config, using defaults");
        Config::new()
    });
    if cli.min_delay.is_some() {
        config.min_delay_ms = cli.min_delay;
    }
    if cli.max_delay.is_some() {
        config.max_delay_ms = cli.max_delay;
    }
    if cli.channel.is_some() {
        config.default_channel = cli.channel.clone();
    }

    if cli.save_config {
        if cli.server_url.is_some() {
            config.server_url = cli.server_url.clone();
        }
        let path = config.save()?;
        println!("Saved config to {}", path.display());
        return Ok(());
    }

    let server_url = cli.server_url.clone().unwrap_or_else(|| config.server_url());
    tracing::info!(%server_url, log = %log_path.display(), "starting ecochat");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &config, &server_url).await;
    tui::restore()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "ecochat exited with an error");
    }
    result
}

async fn run(terminal: &mut Tui, config: &Config, server_url: &str) -> Result<()> {
    let mut events = EventHandler::new();
    let session = ChatSession::with_topic(config.default_channel());
    let mut app = App::new(
        session,
        ChatClient::new(server_url),
        config.typewriter_options(),
        events.sender(),
    );

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event),
            None => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_location_defaults_to_data_dir() {
        let (dir, file_name) = log_location(None);
        assert_eq!(dir, default_log_dir());
        assert_eq!(file_name, "ecochat.log");
    }

    #[test]
    fn test_log_location_splits_custom_path() {
        let (dir, file_name) = log_location(Some(Path::new("/tmp/eco/chat.log")));
        assert_eq!(dir, PathBuf::from("/tmp/eco"));
        assert_eq!(file_name, "chat.log");
    }

    #[test]
    fn test_log_location_bare_file_name_uses_current_dir() {
        let (dir, file_name) = log_location(Some(Path::new("chat.log")));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file_name, "chat.log");
    }
}
