//! Freeze queries: is a habit, task or date exempt from streak-breaking?
//!
//! All functions are pure over the periods they are given. Two families
//! exist:
//!
//! - **Current** queries ([`is_habit_frozen`], [`is_task_frozen`],
//!   [`is_date_frozen`]) answer against a single period using its stored
//!   `[start_date, end_date]`.
//! - **Historical** queries ([`was_date_frozen`], [`frozen_dates`]) replay
//!   the whole history and use each period's *effective* end date, so days
//!   after an early cancellation are never reported as frozen.
//!
//! ```rust
//! use jiff::{civil::date, tz::TimeZone};
//! use streakguard_core::freeze::{was_date_frozen, FreezeTarget};
//! use streakguard_core::models::{FreezeScope, HolidayPeriod};
//!
//! let cancelled = HolidayPeriod {
//!     id: 1,
//!     user_id: "alice".to_string(),
//!     start_date: date(2025, 4, 1),
//!     end_date: date(2025, 4, 30),
//!     scope: FreezeScope::All,
//!     reason: None,
//!     created_at: "2025-03-20T10:00:00Z".parse().unwrap(),
//!     is_active: false,
//!     deactivated_at: Some("2025-04-15T09:00:00Z".parse().unwrap()),
//! };
//! let history = [cancelled];
//! let target = FreezeTarget::habit("run");
//!
//! assert!(was_date_frozen(date(2025, 4, 10), &history, &target, &TimeZone::UTC));
//! assert!(!was_date_frozen(date(2025, 4, 20), &history, &target, &TimeZone::UTC));
//! ```

use jiff::{civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::{
    dates,
    models::{FreezeScope, HabitId, HolidayPeriod, TaskId},
};

/// What a date query is asked about: a habit, and the tasks of that habit
/// due on the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeTarget {
    /// Habit being checked; `None` only matches an all-habits period
    pub habit_id: Option<HabitId>,

    /// Tasks of the habit due on the day
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl FreezeTarget {
    /// Target a whole habit.
    pub fn habit(habit_id: impl Into<HabitId>) -> Self {
        Self {
            habit_id: Some(habit_id.into()),
            task_ids: Vec::new(),
        }
    }

    /// Target a habit together with the tasks due on the day.
    pub fn tasks<I, S>(habit_id: impl Into<HabitId>, task_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        Self {
            habit_id: Some(habit_id.into()),
            task_ids: task_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether `period` freezes `habit_id` as a whole.
///
/// True for an all-habits period or when the habit is in the frozen set.
/// A tasks-scoped period never freezes a habit wholesale.
pub fn is_habit_frozen(period: &HolidayPeriod, habit_id: &str) -> bool {
    match &period.scope {
        FreezeScope::All => true,
        FreezeScope::Habits(habits) => habits.contains(habit_id),
        FreezeScope::Tasks(_) => false,
    }
}

/// Whether `period` freezes `task_id` of `habit_id`.
///
/// Freezing task A of a habit says nothing about task B of the same habit.
pub fn is_task_frozen(period: &HolidayPeriod, habit_id: &str, task_id: &str) -> bool {
    is_habit_frozen(period, habit_id)
        || period
            .scope
            .frozen_tasks_for(habit_id)
            .is_some_and(|tasks| tasks.contains(task_id))
}

/// Whether `date` is frozen for `target` by `period`, using its stored dates.
///
/// For a tasks-scoped period **every** task in `target.task_ids` has to be
/// frozen; a partial overlap is not a frozen day. An empty task list counts
/// as covered when the habit is listed in the period.
pub fn is_date_frozen(date: Date, period: &HolidayPeriod, target: &FreezeTarget) -> bool {
    dates::is_in_range(date, period.start_date, period.end_date)
        && scope_covers(&period.scope, target)
}

/// Whether `date` was actually frozen for `target` by any period in
/// `history`.
///
/// Each period is evaluated against `[start_date, effective_end_date]`; see
/// [`HolidayPeriod::effective_end_date`]. Periods combine by simple union.
pub fn was_date_frozen(
    date: Date,
    history: &[HolidayPeriod],
    target: &FreezeTarget,
    tz: &TimeZone,
) -> bool {
    history
        .iter()
        .any(|period| was_frozen_by(date, period, target, tz))
}

/// Every date in `[from, to]` that was frozen for `target`.
///
/// Streak replay walks these to skip days that were legitimately paused.
pub fn frozen_dates(
    from: Date,
    to: Date,
    history: &[HolidayPeriod],
    target: &FreezeTarget,
    tz: &TimeZone,
) -> Vec<Date> {
    let relevant: Vec<&HolidayPeriod> = history
        .iter()
        .filter(|period| scope_covers(&period.scope, target))
        .collect();

    dates::each_day(from, to)
        .filter(|date| {
            relevant
                .iter()
                .any(|period| was_frozen_by(*date, period, target, tz))
        })
        .collect()
}

fn was_frozen_by(date: Date, period: &HolidayPeriod, target: &FreezeTarget, tz: &TimeZone) -> bool {
    period
        .effective_end_date(tz)
        .is_some_and(|end| dates::is_in_range(date, period.start_date, end))
        && scope_covers(&period.scope, target)
}

fn scope_covers(scope: &FreezeScope, target: &FreezeTarget) -> bool {
    match (scope, target.habit_id.as_deref()) {
        (FreezeScope::All, _) => true,
        (_, None) => false,
        (FreezeScope::Habits(habits), Some(habit_id)) => habits.contains(habit_id),
        (FreezeScope::Tasks(tasks), Some(habit_id)) => tasks.get(habit_id).is_some_and(|frozen| {
            target
                .task_ids
                .iter()
                .all(|task_id| frozen.contains(task_id))
        }),
    }
}
