//! Load, clean, back up and rewrite the target file.
//!
//! A run moves through `load` -> `prepare` -> `apply`. Nothing on disk is
//! touched before `apply`, and `apply` does not write the target until the
//! backup copy exists.

use crate::cleaner::{clean, CleanOutcome, CleanStats};
use crate::config::{backup_path, CleanOptions, RunConfig};
use crate::error::{CleanupError, Result};
use crate::report::Reporter;
use serde_json::Value;
use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The target as read from disk
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Bytes on disk
    pub size: u64,
    pub value: Value,
}

/// A cleaned document, serialized and ready to be written
#[derive(Debug, Clone)]
pub struct CleanPlan {
    pub original_size: u64,
    pub cleaned_text: String,
    pub outcome: CleanOutcome,
}

impl CleanPlan {
    pub fn new_size(&self) -> u64 {
        self.cleaned_text.len() as u64
    }

    /// Negative when pretty printing made the file larger
    pub fn bytes_saved(&self) -> i64 {
        self.original_size as i64 - self.new_size() as i64
    }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: CleanStats,
    pub original_size: u64,
    pub new_size: u64,
    /// `None` for a dry run
    pub backup: Option<PathBuf>,
}

/// Read and parse `target`
pub fn load(target: &Path) -> Result<LoadedDocument> {
    if !target.exists() {
        return Err(CleanupError::FileNotFound {
            path: target.to_path_buf(),
        });
    }

    let bytes = fs::read(target).map_err(|source| CleanupError::Read {
        path: target.to_path_buf(),
        source,
    })?;
    debug!(bytes = bytes.len(), path = %target.display(), "read target");

    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        warn!(path = %target.display(), "target is not valid UTF-8, invalid bytes replaced");
    }

    let value = serde_json::from_str(&text).map_err(|source| CleanupError::Parse {
        path: target.to_path_buf(),
        source,
    })?;
    debug!("parsed target");

    Ok(LoadedDocument {
        size: bytes.len() as u64,
        value,
    })
}

/// Clean the loaded document and serialize the result with two-space indentation
pub fn prepare(document: LoadedDocument, options: &CleanOptions) -> Result<CleanPlan> {
    let outcome = clean(document.value, options);
    let cleaned_text =
        serde_json::to_string_pretty(&outcome.value).map_err(CleanupError::Serialize)?;
    debug!(
        pasted_contents_removed = outcome.stats.pasted_contents_removed,
        histories_trimmed = outcome.stats.histories_trimmed,
        bytes = cleaned_text.len(),
        "cleaned document"
    );

    Ok(CleanPlan {
        original_size: document.size,
        cleaned_text,
        outcome,
    })
}

/// Copy `target` to its backup path, then replace it with the cleaned text.
/// Returns the backup path.
pub fn apply(plan: &CleanPlan, target: &Path) -> Result<PathBuf> {
    let backup = backup_path(target);
    create_backup(target, &backup)?;
    write_replacing(target, plan.cleaned_text.as_bytes())?;
    Ok(backup)
}

/// Run every step, reporting progress as it goes
pub fn run(config: &RunConfig, reporter: &mut dyn Reporter) -> Result<RunSummary> {
    reporter.loading(config);
    let document = load(&config.target)?;
    reporter.loaded(&document);

    let plan = prepare(document, &config.clean)?;
    for event in &plan.outcome.events {
        reporter.event(event);
    }
    reporter.statistics(&plan);

    let backup = if config.dry_run {
        reporter.dry_run_finished();
        None
    } else {
        reporter.backing_up(&backup_path(&config.target));
        let backup = apply(&plan, &config.target)?;
        reporter.completed(&backup);
        Some(backup)
    };

    Ok(RunSummary {
        stats: plan.outcome.stats,
        original_size: plan.original_size,
        new_size: plan.new_size(),
        backup,
    })
}

fn create_backup(target: &Path, backup: &Path) -> Result<()> {
    let copied = fs::copy(target, backup).map_err(|source| CleanupError::Backup {
        path: backup.to_path_buf(),
        source,
    })?;
    info!(bytes = copied, path = %backup.display(), "created backup");
    Ok(())
}

/// Write to a temporary file beside the file `target` resolves to, carrying
/// its permissions, then rename it over that file. A symlinked target keeps
/// its link.
fn write_replacing(target: &Path, content: &[u8]) -> Result<()> {
    let write_err = |source| CleanupError::Write {
        path: target.to_path_buf(),
        source,
    };
    let resolved = fs::canonicalize(target).map_err(write_err)?;
    let target = resolved.as_path();
    let temp_path = temp_path_for(target);

    debug!(path = %temp_path.display(), "writing temporary file");
    let result = fs::write(&temp_path, content)
        .and_then(|()| {
            let permissions = fs::metadata(target)?.permissions();
            fs::set_permissions(&temp_path, permissions)
        })
        .and_then(|()| fs::rename(&temp_path, target));

    if let Err(err) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(err));
    }

    info!(path = %target.display(), bytes = content.len(), "rewrote target");
    Ok(())
}

/// `.<name>.tmp` next to `target`
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_default());
    name.push(".tmp");
    target.with_file_name(name)
}
