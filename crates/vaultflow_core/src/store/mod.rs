//! Durable config store for vault records.
//!
//! # Responsibility
//! - Own the on-disk JSON document holding all vault records.
//! - Keep file I/O and serialization details out of the registry.
//!
//! # Invariants
//! - A missing store file reads as an empty vault mapping.
//! - Every mutation is a full read-modify-write of the document. There is
//!   no locking: overlapping writers are last-write-wins on the whole
//!   mapping. Invocations are expected to be sequential.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;

pub use file::{ConfigStore, VaultMap, CONFIG_FILE_NAME};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for config file access and decoding.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "config store I/O failed at `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(
                    f,
                    "config store file `{}` is not valid JSON: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
