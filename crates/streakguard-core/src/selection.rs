//! Interactive habit/task picker state and its conversion to a freeze scope.
//!
//! A picker lets the user tick whole habits or individual tasks. The
//! [`SelectionState`] records those ticks; [`SelectionState::to_scope`] turns
//! them into the [`FreezeScope`] sent with a creation request, and
//! [`SelectionState::from_scope`] rebuilds the ticks from a stored scope.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{FreezeScope, FrozenTasks, HabitId, HabitWithTasks, ScopeKind};

/// Ticks made in the habit/task picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Scope the user chose at the top of the picker
    pub kind: ScopeKind,

    /// Habits ticked at habit level
    #[serde(default)]
    pub selected_habits: BTreeSet<HabitId>,

    /// Individually ticked tasks, grouped by habit
    #[serde(default)]
    pub selected_tasks: FrozenTasks,
}

impl SelectionState {
    /// An empty selection for the given scope kind.
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Switch the picker to another scope kind, keeping the ticks.
    pub fn set_kind(&mut self, kind: ScopeKind) {
        self.kind = kind;
    }

    /// Whether every task of `habit` is ticked.
    ///
    /// A habit without tasks is fully selected once it is ticked at habit
    /// level.
    pub fn is_habit_fully_selected(&self, habit: &HabitWithTasks) -> bool {
        if habit.task_count() == 0 {
            return self.selected_habits.contains(&habit.id);
        }
        let selected = self
            .selected_tasks
            .get(&habit.id)
            .map_or(0, |tasks| tasks.iter().filter(|t| habit.has_task(t)).count());
        selected == habit.task_count()
    }

    /// Tick or untick a whole habit together with all of its tasks.
    pub fn toggle_habit(&mut self, habit: &HabitWithTasks) {
        if self.is_habit_fully_selected(habit) {
            self.selected_habits.remove(&habit.id);
            self.selected_tasks.remove(&habit.id);
        } else {
            self.selected_habits.insert(habit.id.clone());
            if habit.task_count() > 0 {
                self.selected_tasks
                    .insert(habit.id.clone(), habit.task_ids().cloned().collect());
            }
        }
    }

    /// Tick or untick a single task, keeping the habit-level tick in sync.
    pub fn toggle_task(&mut self, habit: &HabitWithTasks, task_id: &str) {
        let tasks = self.selected_tasks.entry(habit.id.clone()).or_default();
        if !tasks.remove(task_id) {
            tasks.insert(task_id.to_string());
        }
        if tasks.is_empty() {
            self.selected_tasks.remove(&habit.id);
        }

        if self.is_habit_fully_selected(habit) {
            self.selected_habits.insert(habit.id.clone());
        } else {
            self.selected_habits.remove(&habit.id);
        }
    }

    /// Convert the ticks into the scope of a creation request.
    ///
    /// - `All` discards any partial ticks.
    /// - `Habits` keeps only fully selected habits of `catalog`.
    /// - `Tasks` keeps every habit with at least one ticked task, whether or
    ///   not the habit is also fully selected.
    ///
    /// The result may be empty; [`FreezeScope::validate`] rejects that.
    pub fn to_scope(&self, catalog: &[HabitWithTasks]) -> FreezeScope {
        match self.kind {
            ScopeKind::All => FreezeScope::All,
            ScopeKind::Habits => FreezeScope::Habits(
                catalog
                    .iter()
                    .filter(|habit| self.is_habit_fully_selected(habit))
                    .map(|habit| habit.id.clone())
                    .collect(),
            ),
            ScopeKind::Tasks => FreezeScope::Tasks(
                self.selected_tasks
                    .iter()
                    .filter(|(_, tasks)| !tasks.is_empty())
                    .map(|(habit, tasks)| (habit.clone(), tasks.clone()))
                    .collect(),
            ),
        }
    }

    /// Rebuild picker ticks from a stored scope.
    pub fn from_scope(scope: &FreezeScope, catalog: &[HabitWithTasks]) -> Self {
        match scope {
            FreezeScope::All => Self::new(ScopeKind::All),
            FreezeScope::Habits(habits) => {
                let mut state = Self::new(ScopeKind::Habits);
                for habit in catalog.iter().filter(|h| habits.contains(&h.id)) {
                    state.toggle_habit(habit);
                }
                state
            }
            FreezeScope::Tasks(tasks) => {
                let mut state = Self::new(ScopeKind::Tasks);
                state.selected_tasks = tasks.clone();
                state.selected_habits = catalog
                    .iter()
                    .filter(|habit| habit.task_count() > 0 && state.is_habit_fully_selected(habit))
                    .map(|habit| habit.id.clone())
                    .collect();
                state
            }
        }
    }

    /// Human-readable summary of what the ticks would freeze.
    pub fn summary(&self, catalog: &[HabitWithTasks]) -> String {
        self.to_scope(catalog).summary(catalog.len())
    }
}
