//! Best-effort import of settings from an Obsidian vault.
//!
//! # Responsibility
//! - Read the app's own config file inside a vault root and backfill the
//!   directories the user has not picked yet.
//!
//! # Invariants
//! - Fail-open: any failure (missing file, bad JSON, store error) is
//!   logged and swallowed; the edit screen renders regardless.
//! - Only unset properties are filled; user-picked values are never
//!   overwritten.

use crate::model::vault::PathProperty;
use crate::registry::VaultRegistry;
use log::warn;
use serde::Deserialize;
use std::path::Path;

/// The subset of Obsidian's `.obsidian/config` this workflow understands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObsidianAppConfig {
    #[serde(rename = "newFileFolderPath", default)]
    pub new_file_folder_path: Option<String>,
    #[serde(rename = "attachmentFolderPath", default)]
    pub attachment_folder_path: Option<String>,
}

/// Capability seam for reading the app config, mockable in tests.
pub trait ObsidianConfigSource {
    fn app_config(&self, root_dir: &Path) -> Result<ObsidianAppConfig, String>;
}

/// Filesystem reader for `<root>/.obsidian/config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsObsidianConfig;

impl ObsidianConfigSource for FsObsidianConfig {
    fn app_config(&self, root_dir: &Path) -> Result<ObsidianAppConfig, String> {
        let config_path = root_dir.join(".obsidian").join("config");
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|err| format!("read `{}`: {err}", config_path.display()))?;
        serde_json::from_str(&raw).map_err(|err| format!("parse `{}`: {err}", config_path.display()))
    }
}

/// Backfills `notesDir`/`attachmentDir` from the vault's own Obsidian
/// config when they are still unset. Never fails.
pub fn backfill_vault_defaults(
    registry: &VaultRegistry,
    source: &dyn ObsidianConfigSource,
    vault: &str,
) {
    let root_dir = match registry.get_vault_property(vault, PathProperty::RootDir) {
        Ok(Some(root_dir)) => root_dir,
        Ok(None) => return,
        Err(err) => {
            warn!("event=obsidian_import module=obsidian status=error vault={vault} error={err}");
            return;
        }
    };

    let config = match source.app_config(Path::new(&root_dir)) {
        Ok(config) => config,
        Err(err) => {
            warn!("event=obsidian_import module=obsidian status=skipped vault={vault} error={err}");
            return;
        }
    };

    let imports = [
        (config.new_file_folder_path, PathProperty::NotesDir),
        (config.attachment_folder_path, PathProperty::AttachmentDir),
    ];

    for (value, property) in imports {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            continue;
        };

        match registry.is_vault_property_set(vault, property) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => {
                warn!(
                    "event=obsidian_import module=obsidian status=error vault={vault} \
                     property={property} error={err}"
                );
                continue;
            }
        }

        let joined = Path::new(&root_dir).join(&value);
        if let Err(err) =
            registry.set_vault_property(vault, property, &joined.to_string_lossy())
        {
            warn!(
                "event=obsidian_import module=obsidian status=error vault={vault} \
                 property={property} error={err}"
            );
        }
    }
}
