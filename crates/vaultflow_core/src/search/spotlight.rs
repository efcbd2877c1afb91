//! Note search via the macOS Spotlight index.
//!
//! # Responsibility
//! - Run one `mdfind` query over the vault's note directories.
//! - Rank candidates for the result list.
//!
//! # Invariants
//! - Directories that do not exist are skipped, not errors.
//! - An unavailable or failing index yields an empty result set (logged);
//!   the caller renders the create-note fallback either way.
//! - Ordering: `.md` display names first, then ascending query match
//!   position within the display name, then content-change date
//!   descending; remaining ties keep index order (stable sort).

use log::warn;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;

const RESULT_LIMIT: usize = 50;
const NOTE_EXTENSION: &str = ".md";

/// One candidate file returned by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub path: PathBuf,
    pub display_name: String,
    pub content_changed: Option<SystemTime>,
}

impl SearchCandidate {
    pub fn is_note(&self) -> bool {
        self.display_name.ends_with(NOTE_EXTENSION)
    }
}

/// Capability seam over the OS index, mockable in tests.
pub trait NoteSearcher {
    fn search(&self, query: &str, directories: &[PathBuf]) -> Vec<SearchCandidate>;
}

/// `mdfind`-backed searcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotlightSearcher;

impl NoteSearcher for SpotlightSearcher {
    fn search(&self, query: &str, directories: &[PathBuf]) -> Vec<SearchCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let directories = existing_directories(directories);
        if directories.is_empty() {
            return Vec::new();
        }

        let mut command = Command::new("mdfind");
        for directory in &directories {
            command.arg("-onlyin").arg(directory);
        }
        command.arg(spotlight_query(query));

        let output = match command.output() {
            Ok(output) => output,
            Err(err) => {
                warn!("event=spotlight_search module=search status=unavailable error={err}");
                return Vec::new();
            }
        };
        if !output.status.success() {
            warn!(
                "event=spotlight_search module=search status=error code={:?} stderr={}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Vec::new();
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut candidates: Vec<SearchCandidate> = stdout
            .lines()
            .filter(|line| !line.is_empty())
            .take(RESULT_LIMIT)
            .map(|line| candidate_from_path(Path::new(line)))
            .collect();

        sort_candidates(&mut candidates, query);
        candidates
    }
}

/// Builds the Spotlight query: display-name substring match or full-text
/// content match, both case/diacritic-insensitive.
fn spotlight_query(query: &str) -> String {
    // Single quotes delimit mdfind value literals; strip them rather than
    // produce a malformed expression.
    let sanitized: String = query.chars().filter(|ch| *ch != '\'').collect();
    format!(
        "(kMDItemDisplayName == '*{sanitized}*'cd) || (kMDItemTextContent == '{sanitized}'cd)"
    )
}

fn existing_directories(directories: &[PathBuf]) -> Vec<PathBuf> {
    directories
        .iter()
        .filter(|directory| directory.is_dir())
        .cloned()
        .collect()
}

fn candidate_from_path(path: &Path) -> SearchCandidate {
    let display_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let content_changed = std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok();

    SearchCandidate {
        path: path.to_path_buf(),
        display_name,
        content_changed,
    }
}

/// Stable rank: notes first, best query match position next, most
/// recently changed next.
pub fn sort_candidates(candidates: &mut [SearchCandidate], query: &str) {
    let query = query.to_lowercase();
    candidates.sort_by_key(|candidate| {
        let match_position = candidate.display_name.to_lowercase().find(&query);
        (
            !candidate.is_note(),
            match_position.is_none(),
            match_position.unwrap_or(0),
            Reverse(candidate.content_changed),
        )
    });
}
