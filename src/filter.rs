// View filtering and ordering for tasks

use crate::models::{Priority, Task};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sentinel due date for tasks without one, so they order after every real date
pub const NO_DUE_DATE: NaiveDate = NaiveDate::MAX;

/// Filter on completion state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

/// Filter on priority; anything but `All` is an exact match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::High => task.priority == Priority::High,
            PriorityFilter::Medium => task.priority == Priority::Medium,
            PriorityFilter::Low => task.priority == Priority::Low,
        }
    }
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Insertion order
    #[default]
    Created,
    /// High, then Medium, then Low
    Priority,
    /// Earliest due date first, undated tasks last
    #[serde(rename = "due", alias = "due_date")]
    #[value(name = "due", alias = "due-date")]
    DueDate,
}

/// A complete view: two filters and a sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub sort: SortKey,
}

impl Query {
    pub fn new(status: StatusFilter, priority: PriorityFilter, sort: SortKey) -> Self {
        Self { status, priority, sort }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task) && self.priority.matches(task)
    }

    /// Copy the matching tasks out of `tasks` (in insertion order) and sort the copy
    ///
    /// All sorts are stable, so ties keep their insertion order.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut view: Vec<Task> = tasks.into_iter().filter(|t| self.matches(t)).cloned().collect();

        match self.sort {
            SortKey::Created => {}
            SortKey::Priority => view.sort_by_key(|t| t.priority.rank()),
            SortKey::DueDate => view.sort_by_key(|t| t.due_date.unwrap_or(NO_DUE_DATE)),
        }

        view
    }
}
