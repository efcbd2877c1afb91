//! Prefix-filtered directory listing for the path picker.
//!
//! # Responsibility
//! - Interpret the free-text input as `<parent>/<name prefix>` and list
//!   matching entries.
//!
//! # Invariants
//! - Hidden entries (dot-prefixed) are never listed.
//! - Missing or unreadable parents yield an empty list, not an error.
//! - `typed_path` keeps the user's spelling (`~` stays `~`);
//!   `full_path` is the expanded absolute path.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Other,
}

/// One filesystem entry offered by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseEntry {
    /// The entry spelled the way the user is typing it.
    pub typed_path: String,
    /// Expanded absolute path.
    pub full_path: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowseOptions {
    /// List directories only (targets whose value must be a directory).
    pub directories_only: bool,
}

/// Lists non-hidden entries under the input's parent directory whose
/// names start with the input's final segment, sorted by name.
pub fn browse(input: &str, options: BrowseOptions) -> Vec<BrowseEntry> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }

    let (typed_parent, prefix) = split_input(input);
    let expanded_parent = expand_tilde(&typed_parent);
    let Ok(read_dir) = std::fs::read_dir(&expanded_parent) else {
        return Vec::new();
    };

    let prefix_lower = prefix.to_lowercase();
    let mut entries: Vec<BrowseEntry> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            if !prefix_lower.is_empty() && !name.to_lowercase().starts_with(&prefix_lower) {
                return None;
            }

            let kind = match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => EntryKind::Directory,
                Ok(file_type) if file_type.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            };
            if options.directories_only && kind != EntryKind::Directory {
                return None;
            }

            Some(BrowseEntry {
                typed_path: join_typed(&typed_parent, &name),
                full_path: entry.path(),
                kind,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.typed_path.cmp(&b.typed_path));
    entries
}

/// Splits the typed input into its parent directory and name prefix:
/// a trailing `/` means "list everything inside".
fn split_input(input: &str) -> (String, String) {
    if input == "~" {
        return ("~/".to_string(), String::new());
    }
    if input.ends_with('/') {
        return (input.to_string(), String::new());
    }

    match input.rfind('/') {
        Some(slash) => (
            input[..=slash].to_string(),
            input[slash + 1..].to_string(),
        ),
        // Bare segment without a slash: treat as a prefix in `/`.
        None => ("/".to_string(), input.to_string()),
    }
}

fn join_typed(typed_parent: &str, name: &str) -> String {
    if typed_parent.ends_with('/') {
        format!("{typed_parent}{name}")
    } else {
        format!("{typed_parent}/{name}")
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home_dir().join(rest);
    }
    Path::new(path).to_path_buf()
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}
