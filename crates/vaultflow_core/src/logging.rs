//! Logging bootstrap for workflow invocations.
//!
//! # Responsibility
//! - Initialize file-based rolling logs under the workflow data directory,
//!   exactly once per process.
//!
//! # Invariants
//! - Logging init is idempotent for the same directory.
//! - A failed init never aborts the invocation; the workflow keeps
//!   rendering and the failure is reported to the caller as a string.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "vaultflow";
const LOG_SUBDIR: &str = "logs";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Initializes rolling file logs under `<data_dir>/logs`.
///
/// Repeated calls with the same directory are idempotent; a different
/// directory or level is rejected. Invocations are short-lived, so logs
/// are flushed on write.
///
/// # Errors
/// - Returns an error string when `level` is unsupported, the directory
///   cannot be created, or the logger backend fails to start.
pub fn init_logging(level: &str, data_dir: &Path) -> Result<(), String> {
    let normalized_level = normalize_level(level)?;
    let log_dir = data_dir.join(LOG_SUBDIR);

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir == log_dir && state.level == normalized_level {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}` level `{}`",
            state.log_dir.display(),
            state.level
        ));
    }

    let init_dir = log_dir.clone();
    LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        std::fs::create_dir_all(&init_dir).map_err(|err| {
            format!(
                "failed to create log directory `{}`: {err}",
                init_dir.display()
            )
        })?;

        let logger = Logger::try_with_str(normalized_level)
            .map_err(|err| format!("invalid log level `{normalized_level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(init_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::Direct)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        info!(
            "event=invocation_start module=core status=ok version={} level={normalized_level}",
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level: normalized_level,
            log_dir: init_dir,
            _logger: logger,
        })
    })?;

    Ok(())
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` builds log at `debug`, `release` builds at `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
