//! Vault record model.
//!
//! # Responsibility
//! - Define the per-vault configuration record and its wire field names.
//! - Provide typed access to the editable path properties.
//!
//! # Invariants
//! - `name` is the unique key and never changes after creation.
//! - Path properties hold non-empty strings once set; "unset" is `None`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The closed set of editable path-valued vault properties.
///
/// Wire names match the config file and the `show-set-path`/`set-path`
/// action payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathProperty {
    #[serde(rename = "rootDir")]
    RootDir,
    #[serde(rename = "notesDir")]
    NotesDir,
    #[serde(rename = "attachmentDir")]
    AttachmentDir,
    #[serde(rename = "dailyDir")]
    DailyDir,
    #[serde(rename = "regularTemplatePath")]
    RegularTemplatePath,
    #[serde(rename = "dailyTemplatePath")]
    DailyTemplatePath,
}

impl PathProperty {
    /// All properties in the order the edit screen lists them.
    pub const ALL: [PathProperty; 6] = [
        PathProperty::RootDir,
        PathProperty::NotesDir,
        PathProperty::RegularTemplatePath,
        PathProperty::AttachmentDir,
        PathProperty::DailyDir,
        PathProperty::DailyTemplatePath,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::RootDir => "rootDir",
            Self::NotesDir => "notesDir",
            Self::AttachmentDir => "attachmentDir",
            Self::DailyDir => "dailyDir",
            Self::RegularTemplatePath => "regularTemplatePath",
            Self::DailyTemplatePath => "dailyTemplatePath",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rootDir" => Some(Self::RootDir),
            "notesDir" => Some(Self::NotesDir),
            "attachmentDir" => Some(Self::AttachmentDir),
            "dailyDir" => Some(Self::DailyDir),
            "regularTemplatePath" => Some(Self::RegularTemplatePath),
            "dailyTemplatePath" => Some(Self::DailyTemplatePath),
            _ => None,
        }
    }

    /// Whether the path picker for this property should offer directories
    /// only (files are never a valid value for these targets).
    pub fn directories_only(self) -> bool {
        matches!(self, Self::RootDir | Self::DailyDir)
    }
}

impl Display for PathProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One named vault configuration.
///
/// Field names are fixed by the persisted config format; every optional
/// path is absent until the user picks it on the edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    pub name: String,
    #[serde(rename = "rootDir", default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(rename = "notesDir", default, skip_serializing_if = "Option::is_none")]
    pub notes_dir: Option<String>,
    #[serde(
        rename = "attachmentDir",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attachment_dir: Option<String>,
    #[serde(rename = "dailyDir", default, skip_serializing_if = "Option::is_none")]
    pub daily_dir: Option<String>,
    #[serde(
        rename = "regularTemplatePath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub regular_template_path: Option<String>,
    #[serde(
        rename = "dailyTemplatePath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_template_path: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

impl VaultRecord {
    /// Creates a fresh record with no paths configured.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_dir: None,
            notes_dir: None,
            attachment_dir: None,
            daily_dir: None,
            regular_template_path: None,
            daily_template_path: None,
            is_active: false,
        }
    }

    pub fn property(&self, property: PathProperty) -> Option<&str> {
        let value = match property {
            PathProperty::RootDir => &self.root_dir,
            PathProperty::NotesDir => &self.notes_dir,
            PathProperty::AttachmentDir => &self.attachment_dir,
            PathProperty::DailyDir => &self.daily_dir,
            PathProperty::RegularTemplatePath => &self.regular_template_path,
            PathProperty::DailyTemplatePath => &self.daily_template_path,
        };
        value.as_deref()
    }

    pub fn set_property(&mut self, property: PathProperty, value: impl Into<String>) {
        let slot = match property {
            PathProperty::RootDir => &mut self.root_dir,
            PathProperty::NotesDir => &mut self.notes_dir,
            PathProperty::AttachmentDir => &mut self.attachment_dir,
            PathProperty::DailyDir => &mut self.daily_dir,
            PathProperty::RegularTemplatePath => &mut self.regular_template_path,
            PathProperty::DailyTemplatePath => &mut self.daily_template_path,
        };
        *slot = Some(value.into());
    }

    /// Truthiness check used by the edit screen icons: set and non-empty.
    pub fn is_property_set(&self, property: PathProperty) -> bool {
        self.property(property).is_some_and(|value| !value.is_empty())
    }
}
