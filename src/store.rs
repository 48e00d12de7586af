// In-memory task store

use crate::clock::{Clock, SystemClock};
use crate::error::{StoreError, StoreResult};
use crate::filter::Query;
use crate::models::{Task, TaskFields};
use serde::Serialize;
use tracing::{debug, warn};

/// Ordered, process-lifetime collection of tasks
///
/// Tasks are kept in insertion order. Ids start at 1, increase by one per
/// `add`, and are never handed out again, even after a delete.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    clock: Box<dyn Clock>,
}

/// Completion summary over the whole store
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed tasks; `None` when the store is empty
    pub completion_rate: Option<f64>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store stamped by the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store with a custom time source
    pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            clock: Box::new(clock),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Add a new task and return a copy of it
    pub fn add(&mut self, fields: TaskFields) -> StoreResult<Task> {
        if let Err(e) = fields.validate() {
            warn!(error = %e, "add: rejected");
            return Err(e);
        }

        let id = self.next_id;
        self.next_id += 1;

        let task = Task {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            due_date: fields.due_date,
            completed: false,
            created_at: self.clock.now(),
        };
        self.tasks.push(task.clone());

        debug!(id, priority = %task.priority, "add: created task");
        Ok(task)
    }

    /// Get a task by id
    pub fn get(&self, id: u64) -> StoreResult<&Task> {
        self.tasks.iter().find(|t| t.id == id).ok_or(StoreError::NotFound(id))
    }

    /// Overwrite title, description, priority and due date of an existing task
    pub fn update(&mut self, id: u64, fields: TaskFields) -> StoreResult<()> {
        if let Err(e) = fields.validate() {
            warn!(id, error = %e, "update: rejected");
            return Err(e);
        }

        let task = self.find_mut(id)?;
        task.apply(fields);

        debug!(id, "update: task updated");
        Ok(())
    }

    /// Flip the completed flag, returning the new value
    pub fn toggle(&mut self, id: u64) -> StoreResult<bool> {
        let task = self.find_mut(id)?;
        task.completed = !task.completed;
        let completed = task.completed;

        debug!(id, completed, "toggle: task toggled");
        Ok(completed)
    }

    /// Remove a task, returning it
    pub fn delete(&mut self, id: u64) -> StoreResult<Task> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            warn!(id, "delete: task not found");
            return Err(StoreError::NotFound(id));
        };

        let task = self.tasks.remove(pos);
        debug!(id, remaining = self.tasks.len(), "delete: task removed");
        Ok(task)
    }

    /// Filtered and sorted copy of the store
    pub fn query(&self, query: &Query) -> Vec<Task> {
        let view = query.apply(&self.tasks);
        debug!(?query, matched = view.len(), total = self.tasks.len(), "query: built view");
        view
    }

    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let completion_rate = (total > 0).then(|| completed as f64 / total as f64 * 100.0);

        Stats {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn find_mut(&mut self, id: u64) -> StoreResult<&mut Task> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => Ok(task),
            None => {
                warn!(id, "task not found");
                Err(StoreError::NotFound(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::filter::{PriorityFilter, SortKey, StatusFilter};
    use crate::models::Priority;
    use chrono::{Local, NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = TaskStore::new();

        let mut last = 0;
        for i in 0..5 {
            let task = store.add(TaskFields::new(format!("Task {}", i))).unwrap();
            assert!(task.id > last);
            assert!(!task.completed);
            last = task.id;
            assert_eq!(store.len(), i + 1);
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_add_stamps_clock_time() {
        let instant = Local.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let mut store = TaskStore::with_clock(FixedClock(instant));

        let task = store.add(TaskFields::new("Leap day")).unwrap();
        assert_eq!(task.created_at, instant);
        assert_eq!(store.get(task.id).unwrap().created_at, instant);
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut store = TaskStore::new();
        store.add(TaskFields::new("keep")).unwrap();

        assert_eq!(store.add(TaskFields::new("   ")), Err(StoreError::EmptyTitle));
        assert_eq!(store.add(TaskFields::new("")), Err(StoreError::EmptyTitle));
        assert_eq!(store.len(), 1);

        // A rejected add does not consume an id
        let next = store.add(TaskFields::new("next")).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = TaskStore::new();
        store.add(TaskFields::new("a")).unwrap();
        let b = store.add(TaskFields::new("b")).unwrap();

        store.delete(b.id).unwrap();
        let c = store.add(TaskFields::new("c")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_update_overwrites_mutable_fields() {
        let instant = Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut store = TaskStore::with_clock(FixedClock(instant));
        let task = store.add(TaskFields::new("Draft").description("first")).unwrap();
        store.toggle(task.id).unwrap();

        store
            .update(
                task.id,
                TaskFields::new("Final")
                    .description("second")
                    .priority(Priority::High)
                    .due(date(2024, 6, 30)),
            )
            .unwrap();

        let updated = store.get(task.id).unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description, "second");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.due_date, date(2024, 6, 30));
        assert!(updated.completed);
        assert_eq!(updated.created_at, instant);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let mut store = TaskStore::new();
        let task = store.add(TaskFields::new("Original")).unwrap();

        assert_eq!(store.update(task.id, TaskFields::new("  ")), Err(StoreError::EmptyTitle));
        assert_eq!(store.get(task.id).unwrap().title, "Original");

        // Validation is checked before the lookup
        assert_eq!(store.update(99, TaskFields::new("")), Err(StoreError::EmptyTitle));
    }

    #[test]
    fn test_update_missing_task() {
        let mut store = TaskStore::new();
        assert_eq!(store.update(1, TaskFields::new("ghost")), Err(StoreError::NotFound(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = TaskStore::new();
        let task = store.add(TaskFields::new("flip")).unwrap();

        assert!(store.toggle(task.id).unwrap());
        assert!(store.get(task.id).unwrap().completed);
        assert!(!store.toggle(task.id).unwrap());
        assert!(!store.get(task.id).unwrap().completed);

        assert_eq!(store.toggle(42), Err(StoreError::NotFound(42)));
    }

    #[test]
    fn test_delete_then_everything_not_found() {
        let mut store = TaskStore::new();
        let keep = store.add(TaskFields::new("keep")).unwrap();
        let gone = store.add(TaskFields::new("gone")).unwrap();

        let removed = store.delete(gone.id).unwrap();
        assert_eq!(removed.title, "gone");
        assert_eq!(store.len(), 1);

        assert_eq!(store.get(gone.id), Err(StoreError::NotFound(gone.id)));
        assert_eq!(store.toggle(gone.id), Err(StoreError::NotFound(gone.id)));
        assert_eq!(
            store.update(gone.id, TaskFields::new("back")),
            Err(StoreError::NotFound(gone.id))
        );
        assert_eq!(store.delete(gone.id), Err(StoreError::NotFound(gone.id)));

        // Other tasks are untouched
        assert_eq!(store.get(keep.id).unwrap().title, "keep");
    }

    #[test]
    fn test_query_pending_in_insertion_order() {
        let mut store = TaskStore::new();
        for title in ["one", "two", "three", "four"] {
            store.add(TaskFields::new(title)).unwrap();
        }
        store.toggle(2).unwrap();
        store.toggle(4).unwrap();

        let view = store.query(&Query::new(StatusFilter::Pending, PriorityFilter::All, SortKey::Created));
        assert_eq!(titles(&view), vec!["one", "three"]);
    }

    #[test]
    fn test_query_due_date_undated_last() {
        let mut store = TaskStore::new();
        store.add(TaskFields::new("undated first")).unwrap();
        store.add(TaskFields::new("late").due(date(2025, 1, 1))).unwrap();
        store.add(TaskFields::new("undated second")).unwrap();
        store.add(TaskFields::new("early").due(date(2024, 1, 1))).unwrap();

        let view = store.query(&Query::new(StatusFilter::All, PriorityFilter::All, SortKey::DueDate));
        assert_eq!(titles(&view), vec!["early", "late", "undated first", "undated second"]);
    }

    #[test]
    fn test_query_does_not_mutate_store() {
        let mut store = TaskStore::new();
        store.add(TaskFields::new("low").priority(Priority::Low)).unwrap();
        store.add(TaskFields::new("high").priority(Priority::High)).unwrap();

        let view = store.query(&Query::new(StatusFilter::All, PriorityFilter::All, SortKey::Priority));
        assert_eq!(titles(&view), vec!["high", "low"]);

        let order: Vec<&str> = store.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, vec!["low", "high"]);
    }

    #[test]
    fn test_stats() {
        let mut store = TaskStore::new();
        let empty = store.stats();
        assert_eq!(empty.total, 0);
        assert_eq!(empty.pending, 0);
        assert_eq!(empty.completion_rate, None);

        store.add(TaskFields::new("a")).unwrap();
        store.add(TaskFields::new("b")).unwrap();
        store.toggle(1).unwrap();

        let stats = store.stats();
        assert_eq!(
            stats,
            Stats {
                total: 2,
                completed: 1,
                pending: 1,
                completion_rate: Some(50.0),
            }
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut store = TaskStore::new();

        let milk = store.add(TaskFields::new("Buy milk").priority(Priority::Low)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(milk.id, 1);
        assert!(!milk.completed);

        store
            .add(TaskFields::new("Pay bills").priority(Priority::High).due(date(2024, 1, 1)))
            .unwrap();
        assert_eq!(store.len(), 2);

        let by_priority = store.query(&Query::new(StatusFilter::All, PriorityFilter::All, SortKey::Priority));
        assert_eq!(titles(&by_priority), vec!["Pay bills", "Buy milk"]);

        store.toggle(1).unwrap();
        assert!(store.get(1).unwrap().completed);

        let done = store.query(&Query::new(StatusFilter::Completed, PriorityFilter::All, SortKey::Created));
        assert_eq!(titles(&done), vec!["Buy milk"]);

        store.delete(2).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.update(2, TaskFields::new("Pay bills")), Err(StoreError::NotFound(2)));
    }
}
