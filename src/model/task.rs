use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An opaque, identity-comparable task handle.
///
/// The chart never looks inside a task; everything it needs is read and
/// written through a [`TaskAdapter`].
pub trait TaskHandle: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> TaskHandle for T {}

/// Extracts display information from user-defined tasks.
///
/// The setters default to no-ops, which makes tasks read-only.
pub trait TaskAdapter<T> {
    fn row(&self, task: &T) -> i32;

    fn start(&self, task: &T) -> i64;

    fn end(&self, task: &T) -> i64;

    fn text(&self, task: &T) -> String;

    fn tooltip_text(&self, _task: &T) -> Option<String> {
        None
    }

    fn set_row(&mut self, _task: &T, _row: i32) {}

    fn set_start(&mut self, _task: &T, _start: i64) {}

    fn set_end(&mut self, _task: &T, _end: i64) {}

    fn set_text(&mut self, _task: &T, _text: String) {}
}

/// Plain task attributes stored by [`RecordAdapter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskRecord {
    pub start: i64,
    pub end: i64,
    pub row: i32,
    pub text: String,
    pub tooltip: Option<String>,
}

impl TaskRecord {
    pub fn new(text: impl Into<String>, start: i64, end: i64, row: i32) -> Self {
        Self {
            start,
            end,
            row,
            text: text.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// A writable adapter keeping task attributes in a map keyed by handle.
///
/// Unknown handles read as an empty, zero-length task on row 0 and writes to
/// them are ignored.
#[derive(Debug, Clone)]
pub struct RecordAdapter<K> {
    records: HashMap<K, TaskRecord>,
}

impl<K: Eq + Hash> Default for RecordAdapter<K> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> RecordAdapter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, record: TaskRecord) -> Option<TaskRecord> {
        self.records.insert(key, record)
    }

    pub fn remove(&mut self, key: &K) -> Option<TaskRecord> {
        self.records.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&TaskRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K: Eq + Hash> TaskAdapter<K> for RecordAdapter<K> {
    fn row(&self, task: &K) -> i32 {
        self.records.get(task).map(|r| r.row).unwrap_or(0)
    }

    fn start(&self, task: &K) -> i64 {
        self.records.get(task).map(|r| r.start).unwrap_or(0)
    }

    fn end(&self, task: &K) -> i64 {
        self.records.get(task).map(|r| r.end).unwrap_or(0)
    }

    fn text(&self, task: &K) -> String {
        self.records
            .get(task)
            .map(|r| r.text.clone())
            .unwrap_or_default()
    }

    fn tooltip_text(&self, task: &K) -> Option<String> {
        self.records.get(task).and_then(|r| r.tooltip.clone())
    }

    fn set_row(&mut self, task: &K, row: i32) {
        if let Some(record) = self.records.get_mut(task) {
            record.row = row;
        }
    }

    fn set_start(&mut self, task: &K, start: i64) {
        if let Some(record) = self.records.get_mut(task) {
            record.start = start;
        }
    }

    fn set_end(&mut self, task: &K, end: i64) {
        if let Some(record) = self.records.get_mut(task) {
            record.end = end;
        }
    }

    fn set_text(&mut self, task: &K, text: String) {
        if let Some(record) = self.records.get_mut(task) {
            record.text = text;
        }
    }
}
