//! Note search screen for the active vault.
//!
//! # Responsibility
//! - Search the active vault's note directories and render hit items.
//! - Always offer the create-note fallback for the typed input.
//!
//! # Invariants
//! - No active vault redirects to the vault list instead of erroring.
//! - The create-note item is the last item whenever input is non-empty.
//! - Item `arg`s are `obsidian://` URIs the host opens on selection.

use super::{RouterOutcome, ScreenResult};
use crate::action::Action;
use crate::icons;
use crate::item::{Item, Modifier, ModifierKey};
use crate::model::vault::PathProperty;
use crate::registry::VaultRegistry;
use crate::search::spotlight::{NoteSearcher, SearchCandidate};
use crate::session::SessionState;
use crate::template::{load_note_template, render_template};
use log::debug;
use std::path::PathBuf;

/// Routes one note-search invocation against the active vault.
pub fn route_notes(
    input: &str,
    session: &mut SessionState,
    registry: &VaultRegistry,
    searcher: &dyn NoteSearcher,
) -> ScreenResult {
    let Some(vault) = registry.get_active_vault()? else {
        debug!("event=route module=screen entry=notes status=no_active_vault");
        return Ok(RouterOutcome::Continue(Action::VaultsList));
    };

    let input = input.trim();
    let template = load_note_template(registry, session, &vault);

    if input.is_empty() {
        return Ok(RouterOutcome::Render(vec![info_item(
            "Input something to start search",
        )]));
    }

    let directories = search_directories(registry, &vault)?;
    let candidates = searcher.search(input, &directories);
    debug!(
        "event=note_search module=screen vault={vault} hits={}",
        candidates.len()
    );

    let mut items: Vec<Item> = if candidates.is_empty() {
        vec![info_item("Notes not found")]
    } else {
        candidates
            .iter()
            .map(|candidate| note_item(&vault, candidate))
            .collect()
    };
    items.push(new_note_item(&vault, input, &template));

    Ok(RouterOutcome::Render(items))
}

fn search_directories(
    registry: &VaultRegistry,
    vault: &str,
) -> Result<Vec<PathBuf>, super::ScreenError> {
    let mut directories = Vec::new();
    for property in [
        PathProperty::NotesDir,
        PathProperty::DailyDir,
        PathProperty::AttachmentDir,
    ] {
        if let Some(directory) = registry.get_vault_property(vault, property)? {
            directories.push(PathBuf::from(directory));
        }
    }
    Ok(directories)
}

fn note_item(vault: &str, candidate: &SearchCandidate) -> Item {
    let icon = if candidate.is_note() {
        icons::obsidian_light()
    } else {
        icons::file()
    };

    Item::new(&candidate.display_name)
        .arg(format!(
            "obsidian://open?vault={vault}&file={}",
            urlencoding::encode(&candidate.display_name)
        ))
        .icon(icon)
        .modifier(
            ModifierKey::Alt,
            Modifier::new().subtitle(candidate.path.to_string_lossy()),
        )
}

fn new_note_item(vault: &str, input: &str, template: &str) -> Item {
    let content = render_template(template);

    Item::new(format!("Create: \"{input}\""))
        .arg(format!(
            "obsidian://new?vault={vault}&name={}&content={}",
            urlencoding::encode(input),
            urlencoding::encode(&content)
        ))
        .icon(icons::plus())
}

fn info_item(title: &str) -> Item {
    Item::new(title).valid(false).icon(icons::question())
}
