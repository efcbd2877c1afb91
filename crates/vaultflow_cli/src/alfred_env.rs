//! Alfred script-environment adapter.
//!
//! # Responsibility
//! - Read the host-provided environment variables (data directory,
//!   workflow identity, session state).
//!
//! # Invariants
//! - Every accessor has a fallback so the binary stays runnable outside
//!   Alfred for debugging.

use std::path::PathBuf;
use vaultflow_core::SESSION_ENV_VAR;

const DATA_DIR_VAR: &str = "alfred_workflow_data";
const WORKFLOW_NAME_VAR: &str = "alfred_workflow_name";
const WORKFLOW_VERSION_VAR: &str = "alfred_workflow_version";
const ALFRED_VERSION_VAR: &str = "alfred_version";
const DEBUG_VAR: &str = "alfred_debug";

const FALLBACK_DATA_SUBDIR: &str = ".local/share/vaultflow";

/// Non-volatile data directory for the config store and logs.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = non_empty_env(DATA_DIR_VAR) {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(FALLBACK_DATA_SUBDIR),
        None => PathBuf::from(FALLBACK_DATA_SUBDIR),
    }
}

/// Raw session variable carried between invocations; empty when absent.
pub fn session_raw() -> String {
    std::env::var(SESSION_ENV_VAR).unwrap_or_default()
}

pub fn workflow_name() -> String {
    non_empty_env(WORKFLOW_NAME_VAR).unwrap_or_else(|| "vaultflow".to_string())
}

pub fn workflow_version() -> Option<String> {
    non_empty_env(WORKFLOW_VERSION_VAR)
}

pub fn alfred_version() -> Option<String> {
    non_empty_env(ALFRED_VERSION_VAR)
}

/// Whether the user has the workflow debug panel open.
pub fn is_debug() -> bool {
    std::env::var(DEBUG_VAR).as_deref() == Ok("1")
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
