//! Freeze scope: which habits or tasks a holiday period covers.

use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{FreezeError, Result};

/// Opaque habit identifier owned by the habit tracker.
pub type HabitId = String;

/// Opaque task identifier owned by the habit tracker.
pub type TaskId = String;

/// Tasks frozen per habit.
pub type FrozenTasks = BTreeMap<HabitId, BTreeSet<TaskId>>;

/// What a holiday period freezes.
///
/// The three cases are mutually exclusive by construction: a period can never
/// carry both a habit set and a task map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "targets", rename_all = "snake_case")]
pub enum FreezeScope {
    /// Every habit and task of the user
    All,

    /// Whole habits
    Habits(BTreeSet<HabitId>),

    /// Individual tasks, grouped by habit
    Tasks(FrozenTasks),
}

/// Discriminant of [`FreezeScope`], used where only the kind is chosen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    #[default]
    All,
    Habits,
    Tasks,
}

impl FromStr for ScopeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ScopeKind::All),
            "habits" | "habit" => Ok(ScopeKind::Habits),
            "tasks" | "task" => Ok(ScopeKind::Tasks),
            _ => Err(format!("Invalid scope: {s}")),
        }
    }
}

impl ScopeKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::All => "all",
            ScopeKind::Habits => "habits",
            ScopeKind::Tasks => "tasks",
        }
    }
}

impl FreezeScope {
    /// Build a habits scope from any iterator of ids.
    pub fn habits<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<HabitId>,
    {
        FreezeScope::Habits(ids.into_iter().map(Into::into).collect())
    }

    /// Build a tasks scope from `(habit, tasks)` pairs.
    ///
    /// Pairs for the same habit are merged.
    pub fn tasks<I, H, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (H, T)>,
        H: Into<HabitId>,
        T: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        let mut frozen = FrozenTasks::new();
        for (habit, tasks) in entries {
            frozen
                .entry(habit.into())
                .or_default()
                .extend(tasks.into_iter().map(Into::into));
        }
        FreezeScope::Tasks(frozen)
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            FreezeScope::All => ScopeKind::All,
            FreezeScope::Habits(_) => ScopeKind::Habits,
            FreezeScope::Tasks(_) => ScopeKind::Tasks,
        }
    }

    /// Reject a non-"all" scope that names no concrete target.
    ///
    /// # Errors
    ///
    /// * `FreezeError::EmptySelection` - when the habit set or task map is
    ///   empty, or a habit in the task map lists no tasks
    pub fn validate(&self) -> Result<()> {
        let empty = match self {
            FreezeScope::All => false,
            FreezeScope::Habits(habits) => habits.is_empty(),
            FreezeScope::Tasks(tasks) => {
                tasks.is_empty() || tasks.values().any(BTreeSet::is_empty)
            }
        };

        if empty {
            return Err(FreezeError::EmptySelection {
                scope: self.kind().as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Tasks frozen for `habit_id`, when this is a tasks scope that lists it.
    pub fn frozen_tasks_for(&self, habit_id: &str) -> Option<&BTreeSet<TaskId>> {
        match self {
            FreezeScope::Tasks(tasks) => tasks.get(habit_id),
            _ => None,
        }
    }

    /// Number of distinct habits touched by this scope, or `total_habits` for
    /// [`FreezeScope::All`].
    pub fn habit_count(&self, total_habits: usize) -> usize {
        match self {
            FreezeScope::All => total_habits,
            FreezeScope::Habits(habits) => habits.len(),
            FreezeScope::Tasks(tasks) => tasks.len(),
        }
    }

    /// Human-readable description of the scope.
    ///
    /// ```rust
    /// use streakguard_core::models::FreezeScope;
    ///
    /// assert_eq!(FreezeScope::All.summary(4), "All 4 habits");
    /// assert_eq!(FreezeScope::habits(["read"]).summary(4), "1 habit");
    /// assert_eq!(
    ///     FreezeScope::tasks([("gym", vec!["legs", "arms"]), ("read", vec!["novel"])]).summary(4),
    ///     "3 tasks across 2 habits"
    /// );
    /// ```
    pub fn summary(&self, total_habits: usize) -> String {
        match self {
            FreezeScope::All => format!("All {}", plural(total_habits, "habit")),
            FreezeScope::Habits(_) => plural(self.habit_count(total_habits), "habit"),
            FreezeScope::Tasks(tasks) => {
                let total_tasks: usize = tasks.values().map(BTreeSet::len).sum();
                format!(
                    "{} across {}",
                    plural(total_tasks, "task"),
                    plural(self.habit_count(total_habits), "habit")
                )
            }
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_all_is_always_valid() {
        assert!(FreezeScope::All.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_habits() {
        let err = FreezeScope::Habits(BTreeSet::new()).validate().unwrap_err();
        match err {
            FreezeError::EmptySelection { scope } => assert_eq!(scope, "habits"),
            other => panic!("Expected EmptySelection, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_task_map_and_empty_task_set() {
        assert!(FreezeScope::Tasks(FrozenTasks::new()).validate().is_err());

        let mut tasks = FrozenTasks::new();
        tasks.insert("gym".to_string(), BTreeSet::new());
        assert!(FreezeScope::Tasks(tasks).validate().is_err());

        assert!(FreezeScope::tasks([("gym", ["legs"])]).validate().is_ok());
    }

    #[test]
    fn test_tasks_constructor_merges_same_habit() {
        let scope = FreezeScope::tasks([("gym", vec!["legs"]), ("gym", vec!["arms"])]);
        let tasks = scope.frozen_tasks_for("gym").unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(scope.habit_count(10), 1);
    }

    #[test]
    fn test_summary_singular_and_plural() {
        assert_eq!(FreezeScope::All.summary(1), "All 1 habit");
        assert_eq!(FreezeScope::habits(["a", "b"]).summary(5), "2 habits");
        assert_eq!(
            FreezeScope::tasks([("a", ["t1"])]).summary(5),
            "1 task across 1 habit"
        );
    }

    #[test]
    fn test_scope_serde_shape() {
        let json = serde_json::to_value(FreezeScope::habits(["h1"])).unwrap();
        assert_eq!(json["type"], "habits");
        assert_eq!(json["targets"][0], "h1");

        let all: FreezeScope = serde_json::from_str(r#"{"type":"all"}"#).unwrap();
        assert_eq!(all, FreezeScope::All);
    }

    #[test]
    fn test_scope_kind_from_str() {
        assert_eq!("Habits".parse::<ScopeKind>().unwrap(), ScopeKind::Habits);
        assert_eq!("task".parse::<ScopeKind>().unwrap(), ScopeKind::Tasks);
        assert!("some".parse::<ScopeKind>().is_err());
    }
}
