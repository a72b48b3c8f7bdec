//! claude-cleanup - shrink a bloated `~/.claude.json`
//!
//! The chat client persists every conversation's history and every pasted
//! attachment into one JSON file. This crate rewrites that file in a single
//! pass over the parsed document:
//!
//! - every `pastedContents` field is dropped, wherever it appears
//! - every `history` array longer than the configured window is cut down to
//!   its most recent entries
//!
//! The original is always copied to `<file>.backup` before it is replaced.

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod report;

// Re-export commonly used items
pub use cleaner::{clean, CleanEvent, CleanOutcome, CleanStats};
pub use config::{backup_path, default_target_path, CleanOptions, RunConfig};
pub use driver::{apply, load, prepare, run, CleanPlan, LoadedDocument, RunSummary};
pub use error::{CleanupError, Result};
pub use report::{ConsoleReporter, Reporter};
