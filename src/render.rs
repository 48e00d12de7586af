// Terminal rendering of tasks and stats

use crate::models::{Priority, Task};
use crate::store::Stats;
use colored::{ColoredString, Colorize};
use eyre::{Context, Result};

/// Display format for `created_at`
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats tasks for the terminal, with or without ANSI colors
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colored dot when color is on, bracketed label otherwise
    pub fn priority_marker(&self, priority: Priority) -> String {
        if !self.color {
            return format!("[{}]", priority.label());
        }
        let dot = "●";
        let marker: ColoredString = match priority {
            Priority::High => dot.red(),
            Priority::Medium => dot.yellow(),
            Priority::Low => dot.green(),
        };
        marker.to_string()
    }

    /// One or two lines: header line, then the description if there is one
    pub fn task(&self, task: &Task) -> String {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };

        let title = if self.color && task.completed {
            task.title.strikethrough().dimmed().to_string()
        } else if self.color {
            task.title.bold().to_string()
        } else {
            task.title.clone()
        };

        let mut info = Vec::new();
        if let Some(due) = task.due_date {
            info.push(format!("Due: {}", due.format("%Y-%m-%d")));
        }
        info.push(format!("Created: {}", task.created_at.format(CREATED_AT_FORMAT)));
        let info = info.join(" | ");
        let info = if self.color { info.dimmed().to_string() } else { info };

        let mut line = format!(
            "{} #{} {} {}  {}",
            checkbox,
            task.id,
            self.priority_marker(task.priority),
            title,
            info
        );

        if !task.description.is_empty() {
            let description = if self.color {
                task.description.italic().to_string()
            } else {
                task.description.clone()
            };
            line.push_str(&format!("\n      {}", description));
        }

        line
    }

    pub fn view(&self, tasks: &[Task]) -> String {
        if tasks.is_empty() {
            return "No tasks found.".to_string();
        }
        tasks.iter().map(|t| self.task(t)).collect::<Vec<_>>().join("\n")
    }

    pub fn stats(&self, stats: &Stats) -> String {
        let mut line = format!(
            "Total: {}  Completed: {}  Pending: {}",
            stats.total, stats.completed, stats.pending
        );
        if let Some(rate) = stats.completion_rate {
            line.push_str(&format!("  Progress: {:.0}%", rate));
        }
        line
    }

    pub fn json(&self, tasks: &[Task]) -> Result<String> {
        serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")
    }
}
