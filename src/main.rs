//! libmgr binary entrypoint: logging setup and command-line dispatch.

mod args;

use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;

/// Log timestamp formatter (`YYYY-MM-DDTHH:MM:SS`, UTC).
struct LibmgrTimer;

impl tracing_subscriber::fmt::time::FormatTime for LibmgrTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
        let s = libmgr::util::ts_to_date(Some(secs)); // "YYYY-MM-DD HH:MM:SS"
        w.write_str(&s.replacen(' ', "T", 1))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `~/.config/libmgr/logs/libmgr.log`, falling back to stderr.
///
/// Inputs:
/// - `level`: Default filter directive when `RUST_LOG` is unset.
fn init_logging(level: &str) {
    let make_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = libmgr::util::logs_dir();
    log_path.push("libmgr.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(make_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LibmgrTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so startup is not blocked
            tracing_subscriber::fmt()
                .with_env_filter(make_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(LibmgrTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    tracing::info!(dry_run = args.dry_run, "libmgr starting");
    if let Err(err) = args::process_args(&args).await {
        tracing::error!(error = %err, "command failed");
        eprintln!("libmgr: {err}");
        std::process::exit(1);
    }
    tracing::info!("libmgr exited");
}
