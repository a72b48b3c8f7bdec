//! Run configuration and target path resolution.

use crate::error::{CleanupError, Result};
use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// File the chat client keeps its state in, relative to the home directory
pub const TARGET_FILE_NAME: &str = ".claude.json";

/// Suffix appended to the target's file name for the pre-cleaning copy
pub const BACKUP_SUFFIX: &str = ".backup";

/// Number of history entries kept per conversation unless overridden
pub const DEFAULT_MAX_HISTORY_MESSAGES: usize = 5;

/// Options controlling what the cleaner removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// Longest `history` array left untouched; longer ones keep their tail
    pub max_history_messages: NonZeroUsize,
    /// Only strip `pastedContents`, never shorten a `history`
    pub pasted_contents_only: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            max_history_messages: NonZeroUsize::new(DEFAULT_MAX_HISTORY_MESSAGES)
                .unwrap_or(NonZeroUsize::MIN),
            pasted_contents_only: false,
        }
    }
}

/// Everything a single run needs, fixed once the arguments are parsed
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: PathBuf,
    pub dry_run: bool,
    pub clean: CleanOptions,
}

/// `~/.claude.json`
pub fn default_target_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(TARGET_FILE_NAME))
        .ok_or(CleanupError::HomeDirUnavailable)
}

/// Sibling path holding the backup: the full file name plus `.backup`
pub fn backup_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
