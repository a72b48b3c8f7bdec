//! The tree cleaner: a single recursive pass over a parsed document.
//!
//! Two keys trigger a rewrite, anywhere in the tree:
//!
//! - `pastedContents` is dropped together with its value.
//! - `history`, when it holds an array, is cut down to its trailing
//!   `max_history_messages` entries. The array is taken as-is afterwards:
//!   its elements are not visited, so a `pastedContents` nested inside a
//!   kept history message survives. In pasted-contents-only mode `history`
//!   is an ordinary key and is recursed into like any other.
//!
//! Every other object entry, and every array element, is visited
//! recursively. Scalars are returned unchanged. The pass performs no I/O;
//! what it did is returned as a list of [`CleanEvent`]s for the caller to
//! render.

use crate::config::CleanOptions;
use serde_json::{Map, Value};

pub const PASTED_CONTENTS_KEY: &str = "pastedContents";
pub const HISTORY_KEY: &str = "history";

/// Something the cleaner changed, located by its JSON pointer (RFC 6901)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanEvent {
    PastedContentsRemoved {
        pointer: String,
    },
    HistoryTrimmed {
        pointer: String,
        from: usize,
        to: usize,
    },
}

impl CleanEvent {
    pub fn pointer(&self) -> &str {
        match self {
            CleanEvent::PastedContentsRemoved { pointer } => pointer,
            CleanEvent::HistoryTrimmed { pointer, .. } => pointer,
        }
    }
}

/// Counters accumulated during one pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    pub pasted_contents_removed: usize,
    pub histories_trimmed: usize,
}

impl CleanStats {
    /// Tally a list of events
    pub fn from_events(events: &[CleanEvent]) -> Self {
        let mut stats = CleanStats::default();
        for event in events {
            stats.record(event);
        }
        stats
    }

    /// True when the pass left the document untouched
    pub fn is_empty(&self) -> bool {
        self.pasted_contents_removed == 0 && self.histories_trimmed == 0
    }

    fn record(&mut self, event: &CleanEvent) {
        match event {
            CleanEvent::PastedContentsRemoved { .. } => self.pasted_contents_removed += 1,
            CleanEvent::HistoryTrimmed { .. } => self.histories_trimmed += 1,
        }
    }
}

/// Result of a cleaning pass
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub value: Value,
    pub stats: CleanStats,
    /// In document order
    pub events: Vec<CleanEvent>,
}

/// Clean `value` according to `options`
pub fn clean(value: Value, options: &CleanOptions) -> CleanOutcome {
    let mut cleaner = Cleaner {
        options,
        stats: CleanStats::default(),
        events: Vec::new(),
    };
    let mut pointer = String::new();
    let value = cleaner.visit(value, &mut pointer);

    CleanOutcome {
        value,
        stats: cleaner.stats,
        events: cleaner.events,
    }
}

struct Cleaner<'a> {
    options: &'a CleanOptions,
    stats: CleanStats,
    events: Vec<CleanEvent>,
}

impl Cleaner<'_> {
    /// `pointer` addresses `value`; it is restored before returning
    fn visit(&mut self, value: Value, pointer: &mut String) -> Value {
        match value {
            Value::Array(items) => {
                let mut cleaned = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let parent_len = pointer.len();
                    push_token(pointer, &index.to_string());
                    cleaned.push(self.visit(item, pointer));
                    pointer.truncate(parent_len);
                }
                Value::Array(cleaned)
            }
            Value::Object(map) => Value::Object(self.visit_object(map, pointer)),
            scalar => scalar,
        }
    }

    fn visit_object(&mut self, map: Map<String, Value>, pointer: &mut String) -> Map<String, Value> {
        let mut cleaned = Map::with_capacity(map.len());

        for (key, child) in map {
            let parent_len = pointer.len();
            push_token(pointer, &key);

            if key == PASTED_CONTENTS_KEY {
                self.record(CleanEvent::PastedContentsRemoved {
                    pointer: pointer.clone(),
                });
            } else {
                let child = match child {
                    Value::Array(items)
                        if key == HISTORY_KEY && !self.options.pasted_contents_only =>
                    {
                        Value::Array(self.trim_history(items, pointer))
                    }
                    other => self.visit(other, pointer),
                };
                cleaned.insert(key, child);
            }

            pointer.truncate(parent_len);
        }

        cleaned
    }

    /// Keep the most recent entries, oldest dropped first
    fn trim_history(&mut self, mut items: Vec<Value>, pointer: &str) -> Vec<Value> {
        let max = self.options.max_history_messages.get();
        let from = items.len();
        if from > max {
            items.drain(..from - max);
            self.record(CleanEvent::HistoryTrimmed {
                pointer: pointer.to_string(),
                from,
                to: max,
            });
        }
        items
    }

    fn record(&mut self, event: CleanEvent) {
        self.stats.record(&event);
        self.events.push(event);
    }
}

/// Append one reference token, escaped per RFC 6901
fn push_token(pointer: &mut String, token: &str) {
    pointer.push('/');
    for c in token.chars() {
        match c {
            '~' => pointer.push_str("~0"),
            '/' => pointer.push_str("~1"),
            c => pointer.push(c),
        }
    }
}
