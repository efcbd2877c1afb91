//! Session state threaded between invocations.
//!
//! # Responsibility
//! - Parse and re-emit the single JSON session variable the host carries
//!   across invocations.
//! - Give typed access to the pending action envelope and the free-form
//!   session vars (template cache etc.).
//!
//! # Invariants
//! - The state is an explicit value passed through the router, never
//!   ambient process state.
//! - An unparsable incoming value degrades to an empty session (logged),
//!   so a corrupted variable can never wedge the workflow.

use crate::action::Action;
use log::warn;
use serde_json::{Map, Value};

/// Environment variable the host uses to carry the session between
/// invocations.
pub const SESSION_ENV_VAR: &str = "wf_session";

const ACTION_KEY: &str = "action";
const PAYLOAD_KEY: &str = "payload";

/// The mutable cross-invocation state: a pending action envelope plus
/// arbitrary string-keyed vars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    vars: Map<String, Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the serialized session variable. Empty or malformed input
    /// yields an empty session.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::new();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(vars)) => Self { vars },
            Ok(other) => {
                warn!(
                    "event=session_parse module=session status=ignored kind={}",
                    value_kind(&other)
                );
                Self::new()
            }
            Err(err) => {
                warn!("event=session_parse module=session status=error error={err}");
                Self::new()
            }
        }
    }

    /// The pending action envelope, if any. The envelope stays in the
    /// session so a re-render with new input replays the same screen.
    pub fn action(&self) -> Option<Action> {
        let tag = self.vars.get(ACTION_KEY)?;
        let mut envelope = Map::new();
        envelope.insert(ACTION_KEY.to_string(), tag.clone());
        if let Some(payload) = self.vars.get(PAYLOAD_KEY) {
            envelope.insert(PAYLOAD_KEY.to_string(), payload.clone());
        }

        match serde_json::from_value(Value::Object(envelope)) {
            Ok(action) => Some(action),
            Err(err) => {
                warn!("event=session_action module=session status=invalid error={err}");
                None
            }
        }
    }

    /// Replaces the pending action envelope.
    pub fn set_action(&mut self, action: &Action) {
        // Serializing the closed enum cannot fail; the wire shape is an
        // object by construction.
        let Ok(Value::Object(envelope)) = serde_json::to_value(action) else {
            unreachable!("action envelope serializes to an object");
        };

        self.vars.remove(PAYLOAD_KEY);
        for (key, value) in envelope {
            self.vars.insert(key, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(Value::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn set_str(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), Value::String(value.into()));
    }

    /// The raw session object (merged under every emitted item).
    pub fn vars(&self) -> &Map<String, Value> {
        &self.vars
    }

    /// The `{"wf_session": "<json>"}` shape assigned to Alfred variable
    /// blocks, both top-level and per item.
    pub fn to_env_object(&self) -> Value {
        Self::env_object_for(&self.vars)
    }

    pub(crate) fn env_object_for(vars: &Map<String, Value>) -> Value {
        let serialized = serde_json::to_string_pretty(&Value::Object(vars.clone()))
            .unwrap_or_else(|_| "{}".to_string());
        let mut wrapper = Map::new();
        wrapper.insert(SESSION_ENV_VAR.to_string(), Value::String(serialized));
        Value::Object(wrapper)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
