//! Command-facing logger.
use std::path::PathBuf;

use super::utils::log_file_path;

/// Thin facade over [`tracing`] used by command handlers.
///
/// Everything goes to stderr on the console and, at any verbosity, to
/// `$XDG_CACHE_HOME/gpx/<command>.log` through the file layer installed by
/// [`init_subscriber`](super::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only records where the log file lives; the file itself is opened by
    /// the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "gpx::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only with `--verbose`; always in the
    /// log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log what a dry run would have done.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "gpx::dry_run", "{msg}");
    }

    /// Point the user at the log file after a failure.
    pub fn hint_log_file(&self) {
        if let Some(path) = &self.log_file {
            tracing::info!("details: {}", path.display());
        }
    }
}
