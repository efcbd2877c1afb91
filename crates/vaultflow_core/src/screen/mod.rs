//! Screen router: action dispatch and result rendering.
//!
//! # Responsibility
//! - Turn the pending action envelope plus free-text input into either a
//!   rendered item list or the next envelope to trampoline to.
//!
//! # Invariants
//! - The action enum is matched exhaustively; there is no default screen
//!   fallback other than the explicit "no action" case.
//! - Mutations never render items directly: they return
//!   `Continue(next)` and the follow-up invocation renders.

use crate::registry::RegistryError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod notes;
mod vaults;

pub use notes::route_notes;
pub use vaults::route_vaults;

use crate::action::Action;
use crate::item::Item;

/// What one router invocation produced.
#[derive(Debug)]
pub enum RouterOutcome {
    /// Terminal: the items to show.
    Render(Vec<Item>),
    /// Trampoline: store this envelope and ask the host to re-invoke.
    Continue(Action),
}

pub type ScreenResult = Result<RouterOutcome, ScreenError>;

/// Router-level error; anything reaching the entry point becomes the
/// top-level error item.
#[derive(Debug)]
pub enum ScreenError {
    Registry(RegistryError),
    Store(StoreError),
}

impl Display for ScreenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScreenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RegistryError> for ScreenError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<StoreError> for ScreenError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
