//! Script-filter output document.
//!
//! # Responsibility
//! - Assemble the single JSON document one invocation writes to stdout.
//! - Encode the rerun trampoline (empty items + sub-second re-invoke).
//!
//! # Invariants
//! - `rerun` is present only when a re-invoke is requested.
//! - The session appears both as top-level `variables` and merged under
//!   every item; the host applies whichever the user actions.

use crate::item::Item;
use crate::session::SessionState;
use serde::Serialize;
use serde_json::Value;

/// Delay before the host re-invokes the workflow after a mutation step.
pub const RERUN_DELAY_SECONDS: f64 = 0.1;

/// The full response for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument {
    pub variables: Value,
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerun: Option<f64>,
}

impl OutputDocument {
    /// Terminal render: the given items, no rerun.
    pub fn render(session: &SessionState, items: &[Item]) -> Self {
        Self {
            variables: session.to_env_object(),
            items: items.iter().map(|item| item.render(session)).collect(),
            rerun: None,
        }
    }

    /// Trampoline step: zero items plus a near-zero re-invoke delay. The
    /// session must already carry the next action envelope.
    pub fn rerun(session: &SessionState) -> Self {
        Self {
            variables: session.to_env_object(),
            items: Vec::new(),
            rerun: Some(RERUN_DELAY_SECONDS),
        }
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
