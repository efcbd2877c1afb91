//! Selectable result items and their serialized form.
//!
//! # Responsibility
//! - Model one script-filter result row, including per-modifier-key
//!   overrides.
//! - Merge session variables under each item at render time.
//!
//! # Invariants
//! - Merge precedence: modifier vars > item vars > session vars.
//! - Rendering never mutates the base item; overrides are applied onto a
//!   serialized copy.
//! - Items are built fresh per invocation and exist only in the output
//!   document.

use crate::action::Action;
use crate::session::SessionState;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

const ACTION_KEY: &str = "action";
const PAYLOAD_KEY: &str = "payload";

/// Item icon, a path to an image file or macOS `.icns` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub path: PathBuf,
}

impl Icon {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// How Alfred treats the item's `arg` on actioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemType {
    /// Plain result row.
    #[serde(rename = "default")]
    Default,
    /// File row; Alfred checks existence and enables file actions.
    #[serde(rename = "file")]
    File,
    /// File row without the existence check.
    #[serde(rename = "file:skipcheck")]
    FileSkipCheck,
}

/// Modifier key a per-item override is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModifierKey {
    Cmd,
    Alt,
    Ctrl,
    Shift,
    Fn,
}

impl ModifierKey {
    fn wire_name(self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Alt => "alt",
            Self::Ctrl => "ctrl",
            Self::Shift => "shift",
            Self::Fn => "fn",
        }
    }
}

/// Partial override applied while a modifier key is held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifier {
    pub subtitle: Option<String>,
    pub arg: Option<String>,
    pub valid: Option<bool>,
    pub icon: Option<Icon>,
    pub variables: Map<String, Value>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Large-type / copy text attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largetype: Option<String>,
}

/// One selectable row of a rendered screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    pub subtitle: Option<String>,
    pub arg: Option<String>,
    pub autocomplete: Option<String>,
    pub uid: Option<String>,
    pub valid: bool,
    pub item_type: ItemType,
    pub icon: Option<Icon>,
    pub text: Option<ItemText>,
    pub variables: Map<String, Value>,
    pub modifiers: BTreeMap<ModifierKey, Modifier>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            arg: None,
            autocomplete: None,
            uid: None,
            valid: true,
            item_type: ItemType::Default,
            icon: None,
            text: None,
            variables: Map::new(),
            modifiers: BTreeMap::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn text(mut self, text: ItemText) -> Self {
        self.text = Some(text);
        self
    }

    /// Attaches the action envelope this item carries when selected.
    pub fn action(mut self, action: &Action) -> Self {
        if let Ok(Value::Object(envelope)) = serde_json::to_value(action) {
            self.variables.remove(PAYLOAD_KEY);
            self.variables.remove(ACTION_KEY);
            for (key, value) in envelope {
                self.variables.insert(key, value);
            }
        }
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn modifier(mut self, key: ModifierKey, modifier: Modifier) -> Self {
        self.modifiers.insert(key, modifier);
        self
    }

    /// Serializes the item with the session variables merged underneath
    /// its own (and each modifier's merged on top of those).
    pub fn render(&self, session: &SessionState) -> Value {
        let merged = merge_vars(session.vars(), &self.variables);

        let mut object = Map::new();
        object.insert("title".to_string(), Value::String(self.title.clone()));
        if let Some(subtitle) = &self.subtitle {
            object.insert("subtitle".to_string(), Value::String(subtitle.clone()));
        }
        if let Some(arg) = &self.arg {
            object.insert("arg".to_string(), Value::String(arg.clone()));
        }
        if let Some(autocomplete) = &self.autocomplete {
            object.insert(
                "autocomplete".to_string(),
                Value::String(autocomplete.clone()),
            );
        }
        if let Some(uid) = &self.uid {
            object.insert("uid".to_string(), Value::String(uid.clone()));
        }
        object.insert("valid".to_string(), Value::Bool(self.valid));
        if self.item_type != ItemType::Default {
            object.insert(
                "type".to_string(),
                serde_json::to_value(self.item_type).unwrap_or(Value::Null),
            );
        }
        if let Some(icon) = &self.icon {
            object.insert(
                "icon".to_string(),
                serde_json::to_value(icon).unwrap_or(Value::Null),
            );
        }
        if let Some(text) = &self.text {
            object.insert(
                "text".to_string(),
                serde_json::to_value(text).unwrap_or(Value::Null),
            );
        }
        object.insert(
            "variables".to_string(),
            SessionState::env_object_for(&merged),
        );

        if !self.modifiers.is_empty() {
            let mut mods = Map::new();
            for (key, modifier) in &self.modifiers {
                mods.insert(
                    key.wire_name().to_string(),
                    render_modifier(modifier, &merged),
                );
            }
            object.insert("mods".to_string(), Value::Object(mods));
        }

        Value::Object(object)
    }
}

fn render_modifier(modifier: &Modifier, item_vars: &Map<String, Value>) -> Value {
    let mut object = Map::new();
    if let Some(subtitle) = &modifier.subtitle {
        object.insert("subtitle".to_string(), Value::String(subtitle.clone()));
    }
    if let Some(arg) = &modifier.arg {
        object.insert("arg".to_string(), Value::String(arg.clone()));
    }
    if let Some(valid) = modifier.valid {
        object.insert("valid".to_string(), Value::Bool(valid));
    }
    if let Some(icon) = &modifier.icon {
        object.insert(
            "icon".to_string(),
            serde_json::to_value(icon).unwrap_or(Value::Null),
        );
    }

    let merged = merge_vars(item_vars, &modifier.variables);
    object.insert(
        "variables".to_string(),
        SessionState::env_object_for(&merged),
    );
    Value::Object(object)
}

fn merge_vars(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
