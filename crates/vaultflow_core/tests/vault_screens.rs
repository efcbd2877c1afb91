use serde_json::Value;
use std::path::Path;
use vaultflow_core::obsidian::{ObsidianAppConfig, ObsidianConfigSource};
use vaultflow_core::{
    icons, route_vaults, Action, ConfigStore, Item, OutputDocument, PathProperty, RouterOutcome,
    SessionState, VaultRegistry, SESSION_ENV_VAR,
};

/// Obsidian source for vault roots that have no Obsidian config at all.
struct NoObsidian;

impl ObsidianConfigSource for NoObsidian {
    fn app_config(&self, _root_dir: &Path) -> Result<ObsidianAppConfig, String> {
        Err("no config".to_string())
    }
}

struct FixedObsidian(ObsidianAppConfig);

impl ObsidianConfigSource for FixedObsidian {
    fn app_config(&self, _root_dir: &Path) -> Result<ObsidianAppConfig, String> {
        Ok(self.0.clone())
    }
}

fn registry(dir: &tempfile::TempDir) -> VaultRegistry {
    VaultRegistry::new(ConfigStore::new(dir.path()))
}

fn render_items(outcome: RouterOutcome) -> Vec<Item> {
    match outcome {
        RouterOutcome::Render(items) => items,
        RouterOutcome::Continue(action) => panic!("expected render, got continue {action:?}"),
    }
}

fn item_action_tag(item: &Item) -> Option<&str> {
    item.variables.get("action").and_then(Value::as_str)
}

fn item_payload(item: &Item) -> Option<&Value> {
    item.variables.get("payload")
}

#[test]
fn empty_registry_and_empty_input_render_vaults_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);

    let items = render_items(route_vaults(None, "", &registry, &NoObsidian).unwrap());

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Vaults not found.");
    assert_eq!(items[0].subtitle.as_deref(), Some("Input the name to add one."));
    assert!(!items[0].valid);
}

#[test]
fn typed_input_renders_the_add_prompt_even_with_no_vaults() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);

    let items = render_items(route_vaults(None, "Work", &registry, &NoObsidian).unwrap());

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Add vault 'Work'.");
    assert_eq!(item_action_tag(&items[0]), Some("add-vault"));
    assert_eq!(item_payload(&items[0]).unwrap()["name"], "Work");
}

#[test]
fn vault_list_renders_one_item_per_vault_with_active_check_icon() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();
    registry.add_vault("Personal").unwrap();

    let items = render_items(
        route_vaults(Some(Action::VaultsList), "", &registry, &NoObsidian).unwrap(),
    );

    assert_eq!(items.len(), 2);
    let personal = items.iter().find(|item| item.title == "Personal").unwrap();
    let work = items.iter().find(|item| item.title == "Work").unwrap();

    assert_eq!(work.icon, Some(icons::check()));
    assert_eq!(personal.icon, Some(icons::settings()));
    for item in [work, personal] {
        assert_eq!(item.autocomplete.as_deref(), Some(item.title.as_str()));
        assert_eq!(item_action_tag(item), Some("edit-vault"));
        assert_eq!(item_payload(item).unwrap()["name"], item.title);
    }
}

#[test]
fn add_vault_action_persists_and_continues_to_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);

    let outcome = route_vaults(
        Some(Action::AddVault {
            name: "Work".to_string(),
        }),
        "",
        &registry,
        &NoObsidian,
    )
    .unwrap();

    assert!(matches!(outcome, RouterOutcome::Continue(Action::VaultsList)));
    assert!(registry.has_vaults().unwrap());
}

#[test]
fn add_vault_with_empty_name_surfaces_the_registry_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);

    let err = route_vaults(
        Some(Action::AddVault {
            name: "   ".to_string(),
        }),
        "",
        &registry,
        &NoObsidian,
    )
    .unwrap_err();

    assert!(err.to_string().contains("vault name"));
}

#[test]
fn set_path_persists_the_property_and_trampolines_back_to_edit() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();

    let outcome = route_vaults(
        Some(Action::SetPath {
            vault: "Work".to_string(),
            target: PathProperty::RootDir,
            path: "/Users/x/Work".to_string(),
        }),
        "",
        &registry,
        &NoObsidian,
    )
    .unwrap();

    assert_eq!(
        registry
            .get_vault_property("Work", PathProperty::RootDir)
            .unwrap()
            .as_deref(),
        Some("/Users/x/Work")
    );

    let RouterOutcome::Continue(next) = outcome else {
        panic!("expected continue");
    };
    assert_eq!(
        next,
        Action::EditVault {
            name: "Work".to_string()
        }
    );

    // The emitted trampoline document: zero items, rerun set, and the
    // edit-vault envelope stored in the session variable.
    let mut session = SessionState::new();
    session.set_action(&next);
    let document: Value =
        serde_json::from_str(&OutputDocument::rerun(&session).to_json_pretty()).unwrap();
    assert!(document["items"].as_array().unwrap().is_empty());
    assert!(document["rerun"].as_f64().unwrap() > 0.0);

    let stored: Value =
        serde_json::from_str(document["variables"][SESSION_ENV_VAR].as_str().unwrap()).unwrap();
    assert_eq!(stored["action"], "edit-vault");
    assert_eq!(stored["payload"]["name"], "Work");
}

#[test]
fn edit_screen_offers_set_active_only_for_inactive_vaults() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();
    registry.add_vault("Personal").unwrap();

    let active_items = render_items(
        route_vaults(
            Some(Action::EditVault {
                name: "Work".to_string(),
            }),
            "",
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );
    assert!(active_items.iter().all(|item| item.title != "Set as active"));

    let inactive_items = render_items(
        route_vaults(
            Some(Action::EditVault {
                name: "Personal".to_string(),
            }),
            "",
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );
    assert_eq!(inactive_items[0].title, "Set as active");
    assert_eq!(item_action_tag(&inactive_items[0]), Some("set-active"));
}

#[test]
fn edit_screen_lists_every_path_property_and_ends_with_delete() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();
    registry
        .set_vault_property("Work", PathProperty::RootDir, "/Users/x/Work")
        .unwrap();

    let items = render_items(
        route_vaults(
            Some(Action::EditVault {
                name: "Work".to_string(),
            }),
            "",
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );

    // Active vault: six path items plus the delete item.
    assert_eq!(items.len(), PathProperty::ALL.len() + 1);

    let root_item = items.iter().find(|item| item.title == "Vault's root").unwrap();
    assert_eq!(root_item.subtitle.as_deref(), Some("/Users/x/Work"));
    assert_eq!(root_item.icon, Some(icons::check()));
    assert_eq!(item_action_tag(root_item), Some("show-set-path"));
    assert_eq!(item_payload(root_item).unwrap()["target"], "rootDir");

    let notes_item = items
        .iter()
        .find(|item| item.title == "Regular notes directory")
        .unwrap();
    assert_eq!(notes_item.icon, Some(icons::settings()));
    assert_eq!(
        notes_item.subtitle.as_deref(),
        Some("Specify path to regular notes folder of vault 'Work'")
    );
    // Every path item carries the root dir as arg once it is set.
    assert_eq!(notes_item.arg.as_deref(), Some("/Users/x/Work"));

    let last = items.last().unwrap();
    assert_eq!(last.title, "Delete vault from workflow");
    assert_eq!(item_action_tag(last), Some("delete-vault"));
    assert_eq!(last.icon, Some(icons::close()));
}

#[test]
fn obsidian_defaults_backfill_only_unset_properties() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();
    registry
        .set_vault_property("Work", PathProperty::RootDir, "/vault")
        .unwrap();
    registry
        .set_vault_property("Work", PathProperty::NotesDir, "/custom/notes")
        .unwrap();

    let source = FixedObsidian(ObsidianAppConfig {
        new_file_folder_path: Some("inbox".to_string()),
        attachment_folder_path: Some("files".to_string()),
    });

    let _ = route_vaults(
        Some(Action::EditVault {
            name: "Work".to_string(),
        }),
        "",
        &registry,
        &source,
    )
    .unwrap();

    // User-picked value survives; the unset one is imported under root.
    assert_eq!(
        registry
            .get_vault_property("Work", PathProperty::NotesDir)
            .unwrap()
            .as_deref(),
        Some("/custom/notes")
    );
    assert_eq!(
        registry
            .get_vault_property("Work", PathProperty::AttachmentDir)
            .unwrap()
            .as_deref(),
        Some("/vault/files")
    );
}

#[test]
fn obsidian_read_failure_never_breaks_the_edit_screen() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();
    registry
        .set_vault_property("Work", PathProperty::RootDir, "/vault")
        .unwrap();

    let items = render_items(
        route_vaults(
            Some(Action::EditVault {
                name: "Work".to_string(),
            }),
            "",
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );
    assert!(!items.is_empty());
}

#[test]
fn path_picker_without_input_shows_the_typing_hint() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();

    let items = render_items(
        route_vaults(
            Some(Action::ShowSetPath {
                vault: "Work".to_string(),
                target: PathProperty::NotesDir,
            }),
            "",
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Start with typing: / or ~");
    assert!(!items[0].valid);
    assert_eq!(items[0].icon, Some(icons::question()));
}

#[test]
fn path_picker_offers_select_this_path_and_filesystem_entries() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();

    let fs_root = tempfile::tempdir().unwrap();
    std::fs::create_dir(fs_root.path().join("Notes")).unwrap();
    std::fs::write(fs_root.path().join("readme.md"), "x").unwrap();
    let input = format!("{}/", fs_root.path().display());

    let items = render_items(
        route_vaults(
            Some(Action::ShowSetPath {
                vault: "Work".to_string(),
                target: PathProperty::NotesDir,
            }),
            &input,
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );

    assert_eq!(items[0].title, "Select this path");
    assert_eq!(item_action_tag(&items[0]), Some("set-path"));
    assert_eq!(item_payload(&items[0]).unwrap()["path"], input.as_str());
    assert_eq!(item_payload(&items[0]).unwrap()["target"], "notesDir");

    // Both the directory and the file are offered for a files+dirs target.
    let titles: Vec<_> = items.iter().skip(1).map(|item| item.title.as_str()).collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.iter().any(|title| title.ends_with("Notes")));
    assert!(titles.iter().any(|title| title.ends_with("readme.md")));

    let dir_entry = items.iter().find(|item| item.title.ends_with("Notes")).unwrap();
    assert!(dir_entry.autocomplete.as_deref().unwrap().ends_with("Notes/"));
    assert!(!dir_entry.valid);
}

#[test]
fn path_picker_for_root_target_lists_directories_only() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();

    let fs_root = tempfile::tempdir().unwrap();
    std::fs::create_dir(fs_root.path().join("Vault")).unwrap();
    std::fs::write(fs_root.path().join("stray.md"), "x").unwrap();
    let input = format!("{}/", fs_root.path().display());

    let items = render_items(
        route_vaults(
            Some(Action::ShowSetPath {
                vault: "Work".to_string(),
                target: PathProperty::RootDir,
            }),
            &input,
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );

    let titles: Vec<_> = items.iter().skip(1).map(|item| item.title.as_str()).collect();
    assert_eq!(titles.len(), 1);
    assert!(titles[0].ends_with("Vault"));
}

#[test]
fn no_matching_entries_renders_the_not_found_item_after_select() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir);
    registry.add_vault("Work").unwrap();

    let fs_root = tempfile::tempdir().unwrap();
    let input = format!("{}/zzz-nothing", fs_root.path().display());

    let items = render_items(
        route_vaults(
            Some(Action::ShowSetPath {
                vault: "Work".to_string(),
                target: PathProperty::NotesDir,
            }),
            &input,
            &registry,
            &NoObsidian,
        )
        .unwrap(),
    );

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Select this path");
    assert_eq!(items[1].title, "No files found in this path.");
    assert!(items[1].valid);
}
