//! Command-line arguments.

use crate::config::{default_target_path, CleanOptions, RunConfig, DEFAULT_MAX_HISTORY_MESSAGES};
use crate::error::Result;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  claude-cleanup                          Keep last 5 messages & remove pastedContents
  claude-cleanup --max-messages 10        Keep last 10 messages & remove pastedContents
  claude-cleanup --pasted-contents-only   Only remove pastedContents fields
  claude-cleanup --dry-run                Preview changes without applying them";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shrink ~/.claude.json by removing pasted contents and trimming conversation histories",
    long_about = None,
    after_help = EXAMPLES
)]
pub struct Args {
    /// Maximum number of messages to keep per conversation
    #[arg(
        long,
        value_name = "NUMBER",
        default_value_t = NonZeroUsize::new(DEFAULT_MAX_HISTORY_MESSAGES).unwrap_or(NonZeroUsize::MIN),
        value_parser = parse_max_messages,
        allow_hyphen_values = true
    )]
    pub max_messages: NonZeroUsize,

    /// Only remove pastedContents fields, don't trim history
    #[arg(long)]
    pub pasted_contents_only: bool,

    /// Show what would be cleaned without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// File to clean (defaults to ~/.claude.json)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Log internal steps to stderr (repeat for more detail)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Resolve the target path and freeze the options
    pub fn into_run_config(self) -> Result<RunConfig> {
        let target = match self.file {
            Some(path) => path,
            None => default_target_path()?,
        };

        Ok(RunConfig {
            target,
            dry_run: self.dry_run,
            clean: CleanOptions {
                max_history_messages: self.max_messages,
                pasted_contents_only: self.pasted_contents_only,
            },
        })
    }
}

/// Accepts only integers greater than zero
fn parse_max_messages(value: &str) -> std::result::Result<NonZeroUsize, String> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| "--max-messages must be a positive integer".to_string())
}
