/// The ordered collection of tasks shown by a chart.
///
/// Insertion order is paint order: the last task is drawn on top and is
/// picked first. Mutators default to no-ops, making the model read-only.
pub trait GanttModel<T> {
    fn row_count(&self) -> i32;

    fn task_count(&self) -> usize;

    fn task_at(&self, index: usize) -> Option<&T>;

    fn add_task(&mut self, _task: T) {}

    fn remove_task(&mut self, _task: &T) {}
}

/// A model over a `Vec` of task handles with an explicit row count.
#[derive(Debug, Clone)]
pub struct BasicGanttModel<T> {
    tasks: Vec<T>,
    row_count: i32,
}

impl<T: PartialEq> BasicGanttModel<T> {
    /// One row per task.
    pub fn new(tasks: Vec<T>) -> Self {
        let row_count = tasks.len() as i32;
        Self { tasks, row_count }
    }

    /// The row count never drops below the task count.
    pub fn with_row_count(mut self, row_count: i32) -> Self {
        self.row_count = row_count.max(self.tasks.len() as i32);
        self
    }

    pub fn tasks(&self) -> &[T] {
        &self.tasks
    }

    pub fn contains(&self, task: &T) -> bool {
        self.tasks.contains(task)
    }
}

impl<T: PartialEq> GanttModel<T> for BasicGanttModel<T> {
    fn row_count(&self) -> i32 {
        self.row_count
    }

    fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn task_at(&self, index: usize) -> Option<&T> {
        self.tasks.get(index)
    }

    fn add_task(&mut self, task: T) {
        self.tasks.push(task);
        self.row_count = self.row_count.max(self.tasks.len() as i32);
    }

    fn remove_task(&mut self, task: &T) {
        self.tasks.retain(|t| t != task);
    }
}

/// Rows affected by a model change, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEvent {
    pub first_row: i32,
    pub last_row: i32,
}

impl ModelEvent {
    /// Every row of a model with `row_count` rows.
    pub fn all_rows(row_count: i32) -> Self {
        Self {
            first_row: 0,
            last_row: row_count,
        }
    }

    pub fn row(row: i32) -> Self {
        Self::rows(row, row)
    }

    pub fn rows(first_row: i32, last_row: i32) -> Self {
        Self {
            first_row,
            last_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_model_keeps_order_and_grows_rows() {
        let mut model = BasicGanttModel::new(vec!["a", "b"]).with_row_count(5);
        assert_eq!(model.row_count(), 5);
        model.add_task("c");
        assert_eq!(model.task_at(2), Some(&"c"));
        assert_eq!(model.row_count(), 5);

        let mut small = BasicGanttModel::new(vec![1, 2]);
        small.add_task(3);
        assert_eq!(small.row_count(), 3);
    }

    #[test]
    fn removing_a_task_keeps_the_rest_in_order() {
        let mut model = BasicGanttModel::new(vec![1, 2, 3]);
        model.remove_task(&2);
        assert_eq!(model.tasks(), &[1, 3]);
        assert!(model.task_at(5).is_none());
    }

    #[test]
    fn model_event_defaults_to_all_rows() {
        let event = ModelEvent::all_rows(4);
        assert_eq!((event.first_row, event.last_row), (0, 4));
        assert_eq!(ModelEvent::row(2), ModelEvent::rows(2, 2));
    }
}
