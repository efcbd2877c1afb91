//! Icon resolution for result items.
//!
//! # Responsibility
//! - Name the icons the screens use and resolve them to paths.
//!
//! Workflow-local icons ship next to the binary inside the
//! `.alfredworkflow` bundle; generic filesystem icons resolve into the
//! macOS CoreTypes bundle.

use crate::item::Icon;

const CORE_TYPES: &str = "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources";

fn workflow_icon(name: &str) -> Icon {
    Icon::new(format!("icons/{name}"))
}

fn system_icon(name: &str) -> Icon {
    Icon::new(format!("{CORE_TYPES}/{name}"))
}

pub fn check() -> Icon {
    workflow_icon("check.png")
}

pub fn settings() -> Icon {
    workflow_icon("settings.png")
}

pub fn plus() -> Icon {
    workflow_icon("plus.png")
}

pub fn close() -> Icon {
    workflow_icon("close.png")
}

pub fn obsidian_light() -> Icon {
    workflow_icon("obsidian-light.png")
}

pub fn folder() -> Icon {
    system_icon("GenericFolderIcon.icns")
}

pub fn file() -> Icon {
    system_icon("GenericDocumentIcon.icns")
}

pub fn question() -> Icon {
    system_icon("UnknownFSObjectIcon.icns")
}
