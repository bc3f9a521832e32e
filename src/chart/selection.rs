use std::collections::HashSet;
use std::hash::Hash;

/// The set of selected tasks. Unordered, no duplicates.
///
/// Mutating this directly does not notify anyone; callers that batch changes
/// through [`GanttChart::selection_mut`](crate::GanttChart::selection_mut)
/// fire a single selection event afterwards.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    tasks: HashSet<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            tasks: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Selection<T> {
    pub fn insert(&mut self, task: T) -> bool {
        self.tasks.insert(task)
    }

    pub fn remove(&mut self, task: &T) -> bool {
        self.tasks.remove(task)
    }

    /// Flip membership; returns whether the task is now selected.
    pub fn toggle(&mut self, task: T) -> bool {
        if self.tasks.remove(&task) {
            false
        } else {
            self.tasks.insert(task);
            true
        }
    }

    pub fn contains(&self, task: &T) -> bool {
        self.tasks.contains(task)
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.tasks.iter()
    }

    /// Any one selected task.
    pub fn first(&self) -> Option<&T> {
        self.tasks.iter().next()
    }

    /// Keep only tasks matching `keep`; returns whether anything was removed.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(keep);
        self.tasks.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::default();
        assert!(selection.toggle(1));
        assert!(selection.contains(&1));
        assert!(!selection.toggle(1));
        assert!(selection.is_empty());
    }

    #[test]
    fn retain_reports_removals() {
        let mut selection = Selection::default();
        selection.insert(1);
        selection.insert(2);
        assert!(!selection.insert(2));
        assert!(selection.retain(|t| *t != 2));
        assert!(!selection.retain(|_| true));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.first(), Some(&1));
    }
}
