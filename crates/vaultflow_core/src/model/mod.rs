//! Domain model for vault configuration records.
//!
//! # Responsibility
//! - Define the canonical vault record persisted in the config store.
//! - Name the closed set of editable path properties.
//!
//! # Invariants
//! - Serialized field names are fixed by the on-disk config format.
//! - At most one record in a store is marked active (enforced by the
//!   registry, represented here).

pub mod vault;
