use claude_cleanup::{
    clean, run, CleanEvent, CleanOptions, CleanPlan, CleanupError, LoadedDocument, Reporter,
    RunConfig,
};
use serde_json::json;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use tempfile::tempdir;

/// Records the order of reporter calls
#[derive(Default)]
struct RecordingReporter {
    steps: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn loading(&mut self, _config: &RunConfig) {
        self.steps.push("loading".into());
    }

    fn loaded(&mut self, document: &LoadedDocument) {
        self.steps.push(format!("loaded {}", document.size));
    }

    fn event(&mut self, event: &CleanEvent) {
        self.steps.push(format!("event {}", event.pointer()));
    }

    fn statistics(&mut self, plan: &CleanPlan) {
        self.steps.push(format!(
            "statistics {} {}",
            plan.outcome.stats.pasted_contents_removed, plan.outcome.stats.histories_trimmed
        ));
    }

    fn backing_up(&mut self, _backup: &Path) {
        self.steps.push("backing up".into());
    }

    fn completed(&mut self, _backup: &Path) {
        self.steps.push("completed".into());
    }

    fn dry_run_finished(&mut self) {
        self.steps.push("dry run".into());
    }
}

fn config_for(target: &Path, dry_run: bool) -> RunConfig {
    RunConfig {
        target: target.to_path_buf(),
        dry_run,
        clean: CleanOptions::default(),
    }
}

const EXAMPLE: &str = r#"{"foo": {"history": [1,2,3,4,5,6,7], "pastedContents": "big"}}"#;

#[test]
fn test_run_reports_steps_in_order() {
    let dir = tempdir().unwrap();
    let target = dir.path().join(".claude.json");
    fs::write(&target, EXAMPLE).unwrap();

    let mut reporter = RecordingReporter::default();
    let summary = run(&config_for(&target, false), &mut reporter).unwrap();

    assert_eq!(
        reporter.steps,
        vec![
            "loading".to_string(),
            format!("loaded {}", EXAMPLE.len()),
            "event /foo/history".to_string(),
            "event /foo/pastedContents".to_string(),
            "statistics 1 1".to_string(),
            "backing up".to_string(),
            "completed".to_string(),
        ]
    );
    assert_eq!(summary.backup, Some(dir.path().join(".claude.json.backup")));
    assert_eq!(summary.original_size, EXAMPLE.len() as u64);

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written, json!({"foo": {"history": [3, 4, 5, 6, 7]}}));
    assert_eq!(summary.new_size, fs::metadata(&target).unwrap().len());
}

#[test]
fn test_dry_run_stops_after_statistics() {
    let dir = tempdir().unwrap();
    let target = dir.path().join(".claude.json");
    fs::write(&target, EXAMPLE).unwrap();

    let mut reporter = RecordingReporter::default();
    let summary = run(&config_for(&target, true), &mut reporter).unwrap();

    assert_eq!(reporter.steps.last().map(String::as_str), Some("dry run"));
    assert!(!reporter.steps.iter().any(|s| s == "backing up"));
    assert!(summary.backup.is_none());
    assert_eq!(summary.stats.pasted_contents_removed, 1);
    assert_eq!(fs::read_to_string(&target).unwrap(), EXAMPLE);
    assert!(!dir.path().join(".claude.json.backup").exists());
}

#[test]
fn test_run_fails_before_any_write() {
    let dir = tempdir().unwrap();
    let target = dir.path().join(".claude.json");

    let mut reporter = RecordingReporter::default();
    let err = run(&config_for(&target, false), &mut reporter).unwrap_err();
    assert!(matches!(err, CleanupError::FileNotFound { .. }));
    assert_eq!(reporter.steps, vec!["loading".to_string()]);

    fs::write(&target, "[1, 2").unwrap();
    let err = run(&config_for(&target, false), &mut reporter).unwrap_err();
    assert!(err.is_parse());
    assert!(!dir.path().join(".claude.json.backup").exists());
}

#[test]
fn test_trailing_window_for_every_length() {
    let options = CleanOptions {
        max_history_messages: NonZeroUsize::new(4).unwrap(),
        pasted_contents_only: false,
    };

    for len in 0..10usize {
        let history: Vec<usize> = (0..len).collect();
        let outcome = clean(json!({"history": history}), &options);
        let kept: Vec<usize> = serde_json::from_value(outcome.value["history"].clone()).unwrap();

        let expected: Vec<usize> = (len.saturating_sub(4)..len).collect();
        assert_eq!(kept, expected, "history of length {}", len);
        assert_eq!(outcome.stats.histories_trimmed, usize::from(len > 4));
    }
}

#[test]
fn test_pasted_contents_counted_everywhere() {
    let input = json!({
        "a": {"pastedContents": 1},
        "b": [{"pastedContents": 2}, [{"c": {"pastedContents": 3}}]],
        "pastedContents": 4
    });
    let outcome = clean(input, &CleanOptions::default());

    assert_eq!(outcome.stats.pasted_contents_removed, 4);
    assert!(!serde_json::to_string(&outcome.value)
        .unwrap()
        .contains("pastedContents"));
}
