//! Error types for loading, cleaning and rewriting the target file.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CleanupError>;

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("could not determine the home directory")]
    HomeDirUnavailable,
    #[error("{} not found", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize cleaned document")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to create backup at {}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CleanupError {
    /// True when the target exists but is not well-formed JSON
    pub fn is_parse(&self) -> bool {
        matches!(self, CleanupError::Parse { .. })
    }
}
