//! Action envelopes exchanged between invocations.
//!
//! # Responsibility
//! - Define the closed set of screen/mutation instructions.
//! - Fix the `{"action": <tag>, "payload": {...}}` wire shape.
//!
//! # Invariants
//! - Every variant carries exactly the fields its screen needs.
//! - The router matches this enum exhaustively; adding a variant is a
//!   compile error until every consumer handles it.

use crate::model::vault::PathProperty;
use serde::{Deserialize, Serialize};

/// Instruction describing what the next invocation must do.
///
/// Produced by one invocation (stored in the session), consumed by the
/// next. Selecting a result item replaces it; a `Continue` outcome
/// overwrites it before the rerun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload")]
pub enum Action {
    #[serde(rename = "vaults-list")]
    VaultsList,
    #[serde(rename = "add-vault")]
    AddVault { name: String },
    #[serde(rename = "edit-vault")]
    EditVault { name: String },
    #[serde(rename = "delete-vault")]
    DeleteVault { name: String },
    #[serde(rename = "set-active")]
    SetActive { name: String },
    #[serde(rename = "show-set-path")]
    ShowSetPath {
        vault: String,
        target: PathProperty,
    },
    #[serde(rename = "set-path")]
    SetPath {
        vault: String,
        target: PathProperty,
        path: String,
    },
}

impl Action {
    /// Wire tag, for log records.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::VaultsList => "vaults-list",
            Self::AddVault { .. } => "add-vault",
            Self::EditVault { .. } => "edit-vault",
            Self::DeleteVault { .. } => "delete-vault",
            Self::SetActive { .. } => "set-active",
            Self::ShowSetPath { .. } => "show-set-path",
            Self::SetPath { .. } => "set-path",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Action;
    use crate::model::vault::PathProperty;

    #[test]
    fn tagged_wire_shape_round_trips() {
        let action = Action::SetPath {
            vault: "Work".to_string(),
            target: PathProperty::RootDir,
            path: "/Users/x/Work".to_string(),
        };

        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "set-path");
        assert_eq!(json["payload"]["vault"], "Work");
        assert_eq!(json["payload"]["target"], "rootDir");
        assert_eq!(json["payload"]["path"], "/Users/x/Work");

        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn unit_variant_has_no_payload() {
        let json = serde_json::to_value(Action::VaultsList).unwrap();
        assert_eq!(json["action"], "vaults-list");
        assert!(json.get("payload").is_none());

        let back: Action =
            serde_json::from_value(serde_json::json!({ "action": "vaults-list" })).unwrap();
        assert_eq!(back, Action::VaultsList);
    }

    #[test]
    fn every_tag_matches_serialization() {
        let actions = [
            Action::VaultsList,
            Action::AddVault {
                name: "a".to_string(),
            },
            Action::EditVault {
                name: "a".to_string(),
            },
            Action::DeleteVault {
                name: "a".to_string(),
            },
            Action::SetActive {
                name: "a".to_string(),
            },
            Action::ShowSetPath {
                vault: "a".to_string(),
                target: PathProperty::DailyDir,
            },
            Action::SetPath {
                vault: "a".to_string(),
                target: PathProperty::DailyDir,
                path: "/p".to_string(),
            },
        ];
        for action in actions {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["action"], action.tag());
        }
    }
}
