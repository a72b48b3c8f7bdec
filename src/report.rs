//! Rendering run progress for the user.

use crate::cleaner::CleanEvent;
use crate::config::RunConfig;
use crate::driver::{CleanPlan, LoadedDocument};
use colored::Colorize;
use humansize::{format_size, BINARY};
use std::path::Path;

/// Receives each step of a run, in order
pub trait Reporter {
    fn loading(&mut self, config: &RunConfig);
    fn loaded(&mut self, document: &LoadedDocument);
    fn event(&mut self, event: &CleanEvent);
    fn statistics(&mut self, plan: &CleanPlan);
    fn backing_up(&mut self, backup: &Path);
    fn completed(&mut self, backup: &Path);
    fn dry_run_finished(&mut self);
}

/// Prints to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn loading(&mut self, config: &RunConfig) {
        println!("Loading {}...", config.target.display());
        if config.clean.pasted_contents_only {
            println!(
                "{}",
                "PASTED CONTENTS ONLY MODE - Only removing pastedContents fields".bold()
            );
        } else {
            println!(
                "Max messages per conversation: {}",
                config.clean.max_history_messages
            );
        }
        if config.dry_run {
            println!("{}", "DRY RUN MODE - No changes will be made".yellow());
        }
    }

    fn loaded(&mut self, document: &LoadedDocument) {
        println!(
            "Original file size: {}",
            format_size(document.size, BINARY)
        );
        println!("Processing data...");
    }

    fn event(&mut self, event: &CleanEvent) {
        match event {
            CleanEvent::PastedContentsRemoved { pointer } => {
                println!("  Removed pastedContents field at {}", pointer);
            }
            CleanEvent::HistoryTrimmed { pointer, from, to } => {
                println!(
                    "  Trimmed history at {} from {} to {} messages",
                    pointer, from, to
                );
            }
        }
    }

    fn statistics(&mut self, plan: &CleanPlan) {
        let stats = &plan.outcome.stats;

        println!();
        println!("{}", "Statistics:".bold());
        println!(
            "  - pastedContents fields removed: {}",
            stats.pasted_contents_removed
        );
        println!(
            "  - conversation histories trimmed: {}",
            stats.histories_trimmed
        );
        println!("  - Original size: {}", format_size(plan.original_size, BINARY));
        println!("  - New size: {}", format_size(plan.new_size(), BINARY));

        let saved = plan.bytes_saved();
        if saved >= 0 {
            println!(
                "  - Space saved: {}",
                format_size(saved.unsigned_abs(), BINARY).green()
            );
        } else {
            println!(
                "  - Size increase: {}",
                format_size(saved.unsigned_abs(), BINARY).red()
            );
        }
    }

    fn backing_up(&mut self, backup: &Path) {
        println!();
        println!("Creating backup at {}...", backup.display());
    }

    fn completed(&mut self, backup: &Path) {
        println!();
        println!("{}", "Cleanup completed!".green().bold());
        println!("Backup saved at: {}", backup.display());
    }

    fn dry_run_finished(&mut self) {
        println!();
        println!(
            "{}",
            "DRY RUN - No changes were made. Run without --dry-run to apply changes.".yellow()
        );
    }
}
