// Signal handling module
//
// Supported signals:
// - SIGHUP:  Reload the word list
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Start signal handlers (Unix only)
///
/// | Signal  | Action                  |
/// |---------|-------------------------|
/// | SIGHUP  | Reload `game.words_file`|
/// | SIGTERM | Graceful stop           |
/// | SIGINT  | Graceful stop           |
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>, shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, Signal, SignalKind};

    fn register() -> std::io::Result<(Signal, Signal, Signal)> {
        Ok((
            signal(SignalKind::hangup())?,
            signal(SignalKind::terminate())?,
            signal(SignalKind::interrupt())?,
        ))
    }

    tokio::spawn(async move {
        let (mut sighup, mut sigterm, mut sigint) = match register() {
            Ok(signals) => signals,
            Err(e) => {
                logger::log_error(&format!("Failed to register signal handlers: {e}"));
                return;
            }
        };

        logger::log_info(&format!(
            "[SIGNAL] Handlers registered (pid {}): HUP reloads words, TERM/INT stop",
            std::process::id()
        ));

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    logger::log_info("[SIGNAL] SIGHUP received, reloading word list");
                    if let Err(e) = state.reload_dictionary().await {
                        logger::log_error(&format!("Word list reload failed, keeping current list: {e}"));
                    }
                }

                _ = sigterm.recv() => {
                    logger::log_info("[SIGNAL] SIGTERM received, shutting down");
                    shutdown.notify_one();
                    break;
                }

                _ = sigint.recv() => {
                    logger::log_info("[SIGNAL] SIGINT received, shutting down");
                    shutdown.notify_one();
                    break;
                }
            }
        }
    });
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(_state: Arc<AppState>, shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("[SIGNAL] Ctrl+C received, shutting down");
            shutdown.notify_one();
        }
    });
}
