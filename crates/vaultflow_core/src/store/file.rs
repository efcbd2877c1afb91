//! JSON file backing for the config store.
//!
//! # Responsibility
//! - Read and write the `{"vaults": {...}}` document.
//! - Create the data directory lazily on first save.
//!
//! # Invariants
//! - Mapping keys always equal the contained records' `name` fields
//!   (written by the registry, asserted on load).
//! - Saves are pretty-printed so the file stays hand-inspectable.

use super::{StoreError, StoreResult};
use crate::model::vault::VaultRecord;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name-keyed vault mapping, ordered by name for deterministic listing.
pub type VaultMap = BTreeMap<String, VaultRecord>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    vaults: VaultMap,
}

/// Handle to the persistent vault configuration file.
///
/// The handle is cheap and stateless: every load re-reads the file and
/// every save rewrites it, matching the one-shot invocation model.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store rooted in the host-provided data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    /// Store at an explicit file path (tests, debugging).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full vault mapping. A missing file is an empty mapping.
    pub fn load(&self) -> StoreResult<VaultMap> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=empty path={}",
                    self.path.display()
                );
                return Ok(VaultMap::new());
            }
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let document: StoreDocument =
            serde_json::from_str(&raw).map_err(|err| StoreError::Parse {
                path: self.path.clone(),
                source: err,
            })?;

        for (key, record) in &document.vaults {
            if key != &record.name {
                warn!(
                    "event=store_load module=store status=key_mismatch key={key} name={}",
                    record.name
                );
            }
        }

        Ok(document.vaults)
    }

    /// Replaces the full vault mapping on disk.
    pub fn save(&self, vaults: &VaultMap) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| StoreError::Io {
                path: parent.to_path_buf(),
                source: err,
            })?;
        }

        let document = StoreDocument {
            vaults: vaults.clone(),
        };
        let raw = serde_json::to_string_pretty(&document).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            source: err,
        })?;

        std::fs::write(&self.path, raw).map_err(|err| StoreError::Io {
            path: self.path.clone(),
            source: err,
        })?;

        info!(
            "event=store_save module=store status=ok path={} vaults={}",
            self.path.display(),
            vaults.len()
        );
        Ok(())
    }
}
