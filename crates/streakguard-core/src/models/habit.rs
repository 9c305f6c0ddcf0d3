//! Read-only habit catalog projection.

use serde::{Deserialize, Serialize};

use super::{HabitId, TaskId};

/// A task inside a habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskInfo {
    /// Unique identifier for the task
    pub id: TaskId,

    /// Short label of the task
    pub title: String,
}

/// A habit with its ordered task list, as owned by the habit tracker.
///
/// The freeze engine only reads these to build selection state and to count
/// what a scope covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitWithTasks {
    /// Unique identifier for the habit
    pub id: HabitId,

    /// Display name of the habit
    pub name: String,

    /// Optional grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<TaskInfo>,

    /// Current streak length in days
    #[serde(default)]
    pub current_streak: u32,
}

impl HabitWithTasks {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &TaskId> {
        self.tasks.iter().map(|task| &task.id)
    }

    pub fn has_task(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }
}
