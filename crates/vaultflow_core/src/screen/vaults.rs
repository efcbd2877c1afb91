//! Vault management screens.
//!
//! # Responsibility
//! - Dispatch vault actions: list, add, edit, delete, activate, path
//!   selection.
//! - Build the selectable items for each vault screen.
//!
//! # Invariants
//! - Free-text input wins over every other vault-list state: typing
//!   always offers the add prompt.
//! - Mutating actions persist through the registry and `Continue`; only
//!   display actions render items.

use super::{RouterOutcome, ScreenResult};
use crate::action::Action;
use crate::icons;
use crate::item::{Item, ItemType};
use crate::model::vault::PathProperty;
use crate::obsidian::{backfill_vault_defaults, ObsidianConfigSource};
use crate::registry::VaultRegistry;
use crate::search::browse::{browse, BrowseEntry, BrowseOptions, EntryKind};
use crate::store::VaultMap;
use log::debug;

/// Routes one vault-management invocation.
///
/// `action` is the envelope pending in the session (`None` falls back to
/// the vault list); `input` is the trimmed free-text argument.
pub fn route_vaults(
    action: Option<Action>,
    input: &str,
    registry: &VaultRegistry,
    obsidian: &dyn ObsidianConfigSource,
) -> ScreenResult {
    debug!(
        "event=route module=screen entry=vaults action={} input_len={}",
        action.as_ref().map_or("none", Action::tag),
        input.len()
    );

    match action {
        None | Some(Action::VaultsList) => vaults_list(input, registry),
        Some(Action::AddVault { name }) => {
            registry.add_vault(&name)?;
            Ok(RouterOutcome::Continue(Action::VaultsList))
        }
        Some(Action::DeleteVault { name }) => {
            registry.delete_vault(&name)?;
            Ok(RouterOutcome::Continue(Action::VaultsList))
        }
        Some(Action::SetActive { name }) => {
            registry.set_active_vault(&name)?;
            Ok(RouterOutcome::Continue(Action::VaultsList))
        }
        Some(Action::EditVault { name }) => {
            backfill_vault_defaults(registry, obsidian, &name);
            edit_vault_options(&name, registry)
        }
        Some(Action::ShowSetPath { vault, target }) => {
            Ok(RouterOutcome::Render(path_picker_items(
                &vault, target, input,
            )))
        }
        Some(Action::SetPath {
            vault,
            target,
            path,
        }) => {
            registry.set_vault_property(&vault, target, &path)?;
            Ok(RouterOutcome::Continue(Action::EditVault { name: vault }))
        }
    }
}

fn vaults_list(input: &str, registry: &VaultRegistry) -> ScreenResult {
    if !input.is_empty() {
        return Ok(RouterOutcome::Render(vec![add_vault_prompt(input)]));
    }

    let vaults = registry.list_vaults()?;
    if vaults.is_empty() {
        return Ok(RouterOutcome::Render(vec![no_vaults_item()]));
    }

    Ok(RouterOutcome::Render(vault_items(&vaults)))
}

fn add_vault_prompt(input: &str) -> Item {
    Item::new(format!("Add vault '{input}'.")).action(&Action::AddVault {
        name: input.to_string(),
    })
}

fn no_vaults_item() -> Item {
    Item::new("Vaults not found.")
        .subtitle("Input the name to add one.")
        .valid(false)
}

fn vault_items(vaults: &VaultMap) -> Vec<Item> {
    vaults
        .values()
        .map(|record| {
            let icon = if record.is_active {
                icons::check()
            } else {
                icons::settings()
            };
            Item::new(&record.name)
                .autocomplete(&record.name)
                .subtitle("Select to edit vault settings.")
                .action(&Action::EditVault {
                    name: record.name.clone(),
                })
                .icon(icon)
        })
        .collect()
}

fn edit_vault_options(vault: &str, registry: &VaultRegistry) -> ScreenResult {
    let mut items = Vec::with_capacity(PathProperty::ALL.len() + 2);

    if !registry.is_vault_active(vault)? {
        items.push(
            Item::new("Set as active")
                .subtitle(format!("'{vault}' will become default vault"))
                .action(&Action::SetActive {
                    name: vault.to_string(),
                }),
        );
    }

    let root_dir = registry.get_vault_property(vault, PathProperty::RootDir)?;
    for property in PathProperty::ALL {
        items.push(path_setting_item(vault, property, root_dir.as_deref(), registry)?);
    }

    items.push(
        Item::new("Delete vault from workflow")
            .subtitle(format!("Will delete '{vault}' vault."))
            .action(&Action::DeleteVault {
                name: vault.to_string(),
            })
            .icon(icons::close()),
    );

    Ok(RouterOutcome::Render(items))
}

fn path_setting_item(
    vault: &str,
    property: PathProperty,
    root_dir: Option<&str>,
    registry: &VaultRegistry,
) -> Result<Item, super::ScreenError> {
    let (title, hint) = property_labels(vault, property);
    let stored = registry.get_vault_property(vault, property)?;

    let icon = if stored.as_deref().is_some_and(|value| !value.is_empty()) {
        icons::check()
    } else {
        icons::settings()
    };

    let mut item = Item::new(title)
        .subtitle(stored.unwrap_or(hint))
        .action(&Action::ShowSetPath {
            vault: vault.to_string(),
            target: property,
        })
        .icon(icon);
    if let Some(root_dir) = root_dir {
        item = item.arg(root_dir);
    }
    Ok(item)
}

fn property_labels(vault: &str, property: PathProperty) -> (String, String) {
    match property {
        PathProperty::RootDir => (
            "Vault's root".to_string(),
            format!("Specify path to '{vault}' directory"),
        ),
        PathProperty::NotesDir => (
            "Regular notes directory".to_string(),
            format!("Specify path to regular notes folder of vault '{vault}'"),
        ),
        PathProperty::RegularTemplatePath => (
            "Regular note template file".to_string(),
            format!("Specify path to template file of vault '{vault}'"),
        ),
        PathProperty::AttachmentDir => (
            "Attachment directory".to_string(),
            format!("Specify path to attachments folder of vault '{vault}'"),
        ),
        PathProperty::DailyDir => (
            "Daily notes directory".to_string(),
            format!("Specify path to daily notes folder of vault '{vault}'"),
        ),
        PathProperty::DailyTemplatePath => (
            "Daily note template file".to_string(),
            format!("Specify path to daily template file of vault '{vault}'"),
        ),
    }
}

fn path_picker_items(vault: &str, target: PathProperty, input: &str) -> Vec<Item> {
    let entries = browse(
        input,
        BrowseOptions {
            directories_only: target.directories_only(),
        },
    );

    let mut items: Vec<Item> = entries.iter().map(entry_item).collect();

    if items.is_empty() {
        let title = if input.is_empty() {
            "Start with typing: / or ~"
        } else {
            "No files found in this path."
        };
        items.insert(
            0,
            Item::new(title)
                .valid(!input.is_empty())
                .icon(icons::question()),
        );
    }

    if !input.is_empty() {
        items.insert(
            0,
            Item::new("Select this path")
                .action(&Action::SetPath {
                    vault: vault.to_string(),
                    target,
                    path: input.to_string(),
                })
                .icon(icons::settings()),
        );
    }

    items
}

fn entry_item(entry: &BrowseEntry) -> Item {
    let (icon, autocomplete_suffix) = match entry.kind {
        EntryKind::Directory => (icons::folder(), "/"),
        EntryKind::File => (icons::file(), ""),
        EntryKind::Other => (icons::question(), ""),
    };

    Item::new(&entry.typed_path)
        .subtitle(entry.full_path.to_string_lossy())
        .autocomplete(format!(
            "{}{autocomplete_suffix}",
            entry.full_path.display()
        ))
        .valid(false)
        .item_type(ItemType::File)
        .icon(icon)
}
