use std::collections::VecDeque;

use crate::error::{GanttError, Result};
use crate::model::TaskAdapter;

/// Immutable capture of a task's position at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State<T> {
    pub task: T,
    pub start: i64,
    pub end: i64,
    pub row: i32,
}

impl<T: Clone> State<T> {
    pub fn capture<A: TaskAdapter<T> + ?Sized>(adapter: &A, task: &T) -> Self {
        Self {
            task: task.clone(),
            start: adapter.start(task),
            end: adapter.end(task),
            row: adapter.row(task),
        }
    }

    /// Write start, end and row back through the adapter.
    pub fn restore<A: TaskAdapter<T> + ?Sized>(&self, adapter: &mut A) {
        adapter.set_start(&self.task, self.start);
        adapter.set_end(&self.task, self.end);
        adapter.set_row(&self.task, self.row);
    }
}

/// What produced an edit. Only keyboard edits coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Keyboard,
    Mouse,
}

/// A reversible edit of one or more tasks, recorded as before/after
/// snapshots.
#[derive(Debug, Clone)]
pub struct GanttEdit<T> {
    kind: EditKind,
    edited: Vec<T>,
    before: Option<Vec<State<T>>>,
    after: Option<Vec<State<T>>>,
}

impl<T: Clone + PartialEq> GanttEdit<T> {
    pub fn new(kind: EditKind) -> Self {
        Self {
            kind,
            edited: Vec::new(),
            before: None,
            after: None,
        }
    }

    pub fn kind(&self) -> EditKind {
        self.kind
    }

    pub fn edited_tasks(&self) -> &[T] {
        &self.edited
    }

    pub fn add_edited_task(&mut self, task: T) {
        self.edited.push(task);
    }

    pub fn grab_before_snapshot<A: TaskAdapter<T> + ?Sized>(&mut self, adapter: &A) {
        self.before = Some(self.snapshot(adapter));
    }

    pub fn grab_after_snapshot<A: TaskAdapter<T> + ?Sized>(&mut self, adapter: &A) {
        self.after = Some(self.snapshot(adapter));
    }

    pub fn before_state(&self) -> Option<&[State<T>]> {
        self.before.as_deref()
    }

    pub fn after_state(&self) -> Option<&[State<T>]> {
        self.after.as_deref()
    }

    fn snapshot<A: TaskAdapter<T> + ?Sized>(&self, adapter: &A) -> Vec<State<T>> {
        self.edited
            .iter()
            .map(|task| State::capture(adapter, task))
            .collect()
    }

    /// Fails if either snapshot is missing.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.before.is_none() {
            return Err(GanttError::IncompleteEdit("before"));
        }
        if self.after.is_none() {
            return Err(GanttError::IncompleteEdit("after"));
        }
        Ok(())
    }

    pub fn undo<A: TaskAdapter<T> + ?Sized>(&self, adapter: &mut A) {
        for state in self.before.iter().flatten() {
            state.restore(adapter);
        }
    }

    pub fn redo<A: TaskAdapter<T> + ?Sized>(&self, adapter: &mut A) {
        for state in self.after.iter().flatten() {
            state.restore(adapter);
        }
    }

    /// Recorded edits never become irreversible.
    pub fn can_redo(&self) -> bool {
        true
    }

    /// Merge `next` into this edit. Succeeds only for two keyboard edits of
    /// the same ordered task list; this edit then ends where `next` ends.
    pub fn absorb(&mut self, next: &GanttEdit<T>) -> bool {
        if self.kind != EditKind::Keyboard || next.kind != EditKind::Keyboard {
            return false;
        }
        if self.edited != next.edited {
            return false;
        }
        self.after = next.after.clone();
        true
    }
}

/// Bounded undo/redo history of committed edits.
#[derive(Debug, Clone)]
pub struct UndoLog<T> {
    undo: VecDeque<GanttEdit<T>>,
    redo: Vec<GanttEdit<T>>,
    limit: usize,
}

impl<T: Clone + PartialEq> UndoLog<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a completed edit, coalescing it into the latest one when
    /// possible. Clears the redo history.
    pub fn add_edit(&mut self, edit: GanttEdit<T>) -> Result<()> {
        edit.ensure_complete()?;
        self.redo.clear();

        if let Some(last) = self.undo.back_mut() {
            if last.absorb(&edit) {
                tracing::debug!(tasks = edit.edited.len(), "coalesced keyboard edit");
                return Ok(());
            }
        }

        self.undo.push_back(edit);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        Ok(())
    }

    pub fn undo<A: TaskAdapter<T> + ?Sized>(&mut self, adapter: &mut A) -> Result<()> {
        let edit = self.undo.pop_back().ok_or(GanttError::CannotUndo)?;
        edit.undo(adapter);
        self.redo.push(edit);
        Ok(())
    }

    pub fn redo<A: TaskAdapter<T> + ?Sized>(&mut self, adapter: &mut A) -> Result<()> {
        let edit = self.redo.pop().ok_or(GanttError::CannotRedo)?;
        edit.redo(adapter);
        self.undo.push_back(edit);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.redo.last().is_some_and(|edit| edit.can_redo())
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
