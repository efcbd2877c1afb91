//! Core domain logic for Vaultflow.
//! This crate is the single source of truth for vault state and screen flow.

pub mod action;
pub mod icons;
pub mod item;
pub mod logging;
pub mod model;
pub mod obsidian;
pub mod output;
pub mod registry;
pub mod screen;
pub mod search;
pub mod session;
pub mod store;
pub mod template;

pub use action::Action;
pub use item::{Icon, Item, ItemText, ItemType, Modifier, ModifierKey};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::vault::{PathProperty, VaultRecord};
pub use obsidian::{FsObsidianConfig, ObsidianConfigSource};
pub use output::{OutputDocument, RERUN_DELAY_SECONDS};
pub use registry::{RegistryError, RegistryResult, VaultRegistry};
pub use screen::{route_notes, route_vaults, RouterOutcome, ScreenError, ScreenResult};
pub use search::spotlight::{NoteSearcher, SearchCandidate, SpotlightSearcher};
pub use session::{SessionState, SESSION_ENV_VAR};
pub use store::{ConfigStore, StoreError, StoreResult, VaultMap};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
