//! Parameter structures shared by the CLI and the MCP server.
//!
//! Dates travel as `YYYY-MM-DD` strings and scopes as the stored wire shape
//! (a scope kind plus the two optional collections), so every interface
//! parses and validates them the same way. Interface layers wrap these in
//! their own framework-specific types:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schemas for the MCP tools are derived behind the `schema` feature.

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    dates,
    db::period_queries::NewPeriod,
    error::{FreezeError, Result},
    freeze::FreezeTarget,
    models::{FreezeScope, FrozenTaskEntry, HabitId, PlanTier, ScopeKind},
};

/// Parameters for operations that only need the user.
///
/// Used by get_active_period, get_history, get_stats and
/// get_habits_with_tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UserParams {
    /// User whose data to read
    pub user_id: String,
}

/// Parameters for the allowance pre-check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CanCreateParams {
    /// User planning the holiday
    pub user_id: String,
    /// First frozen day, `YYYY-MM-DD`
    pub start_date: String,
    /// Last frozen day, `YYYY-MM-DD`
    pub end_date: String,
}

impl CanCreateParams {
    /// Parse the date range.
    pub fn dates(&self) -> Result<(Date, Date)> {
        parse_range(&self.start_date, &self.end_date)
    }
}

/// Parameters for creating a holiday period.
///
/// Exactly one scope representation may be filled: nothing for `all`,
/// `frozen_habits` for `habits`, `frozen_tasks` for `tasks`. The default
/// request freezes everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePeriod {
    /// User the period belongs to
    pub user_id: String,
    /// First frozen day, `YYYY-MM-DD`
    pub start_date: String,
    /// Last frozen day, `YYYY-MM-DD`
    pub end_date: String,
    /// What to freeze: 'all', 'habits' or 'tasks'
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Habit ids to freeze when scope is 'habits'
    #[serde(default)]
    pub frozen_habits: Vec<HabitId>,
    /// Tasks to freeze per habit when scope is 'tasks'
    #[serde(default)]
    pub frozen_tasks: Vec<FrozenTaskEntry>,
    /// Optional note shown in the history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn default_scope() -> String {
    ScopeKind::All.as_str().to_string()
}

impl Default for CreatePeriod {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            scope: default_scope(),
            frozen_habits: Vec::new(),
            frozen_tasks: Vec::new(),
            reason: None,
        }
    }
}

impl CreatePeriod {
    /// Parse the scope fields into a [`FreezeScope`].
    ///
    /// # Errors
    ///
    /// * `FreezeError::InvalidInput` - unknown scope kind, or a collection
    ///   filled that does not belong to the chosen kind
    /// * `FreezeError::EmptySelection` - a habits/tasks scope naming nothing
    ///
    /// # Examples
    ///
    /// ```rust
    /// use streakguard_core::models::FreezeScope;
    /// use streakguard_core::params::CreatePeriod;
    ///
    /// let params = CreatePeriod {
    ///     user_id: "alice".to_string(),
    ///     start_date: "2025-07-01".to_string(),
    ///     end_date: "2025-07-05".to_string(),
    ///     scope: "habits".to_string(),
    ///     frozen_habits: vec!["3".to_string()],
    ///     ..Default::default()
    /// };
    /// assert_eq!(params.freeze_scope().unwrap(), FreezeScope::habits(["3"]));
    ///
    /// let empty = CreatePeriod { frozen_habits: vec![], ..params };
    /// assert!(empty.freeze_scope().is_err());
    /// ```
    pub fn freeze_scope(&self) -> Result<FreezeScope> {
        let kind = self
            .scope
            .parse::<ScopeKind>()
            .map_err(|e| FreezeError::invalid_input("scope").with_reason(e))?;

        let scope = match kind {
            ScopeKind::All => {
                if !self.frozen_habits.is_empty() || !self.frozen_tasks.is_empty() {
                    return Err(FreezeError::invalid_input("scope").with_reason(
                        "an 'all' holiday cannot also list habits or tasks",
                    ));
                }
                FreezeScope::All
            }
            ScopeKind::Habits => {
                if !self.frozen_tasks.is_empty() {
                    return Err(FreezeError::invalid_input("frozen_tasks")
                        .with_reason("a 'habits' holiday cannot list tasks"));
                }
                FreezeScope::habits(self.frozen_habits.iter().cloned())
            }
            ScopeKind::Tasks => {
                if !self.frozen_habits.is_empty() {
                    return Err(FreezeError::invalid_input("frozen_habits")
                        .with_reason("a 'tasks' holiday cannot list whole habits"));
                }
                FreezeScope::tasks(
                    self.frozen_tasks
                        .iter()
                        .map(|entry| (entry.habit_id.clone(), entry.task_ids.iter().cloned())),
                )
            }
        };

        scope.validate()?;
        Ok(scope)
    }

    /// Validate every field and build the row to insert.
    pub fn to_new_period(&self) -> Result<NewPeriod> {
        let (start_date, end_date) = parse_range(&self.start_date, &self.end_date)?;
        Ok(NewPeriod {
            user_id: self.user_id.clone(),
            start_date,
            end_date,
            scope: self.freeze_scope()?,
            reason: self
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from),
        })
    }
}

/// Parameters for cancelling a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CancelPeriod {
    /// Owner of the period
    pub user_id: String,
    /// ID of the period to cancel
    pub id: u64,
}

/// Parameters for asking whether a day was frozen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FrozenQuery {
    /// User whose history to consult
    pub user_id: String,
    /// Day to check, `YYYY-MM-DD`
    pub date: String,
    /// Last day of a range to list frozen days for, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    /// Habit to check; omit to only match all-habits holidays
    #[serde(default)]
    pub habit_id: Option<HabitId>,
    /// Tasks of the habit due that day; all must be frozen
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl FrozenQuery {
    pub fn date(&self) -> Result<Date> {
        dates::parse_date("date", &self.date)
    }

    /// The queried range; a single day unless `until` is given.
    pub fn range(&self) -> Result<(Date, Date)> {
        let from = self.date()?;
        let to = match &self.until {
            Some(until) => dates::parse_date("until", until)?,
            None => from,
        };
        if to < from {
            return Err(FreezeError::invalid_range(format!(
                "range ends ({to}) before it starts ({from})"
            )));
        }
        Ok((from, to))
    }

    pub fn target(&self) -> FreezeTarget {
        FreezeTarget {
            habit_id: self.habit_id.clone(),
            task_ids: self.task_ids.clone(),
        }
    }
}

/// Parameters for adding a habit to the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddHabit {
    /// Owner of the habit
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Optional grouping label
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for adding a task to a habit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// Owner of the habit
    pub user_id: String,
    /// Habit to extend
    pub habit_id: HabitId,
    /// Short label of the task
    pub title: String,
}

/// Parameters for changing a user's plan tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTier {
    pub user_id: String,
    /// 'free' or 'premium'
    pub tier: String,
}

impl SetTier {
    pub fn tier(&self) -> Result<PlanTier> {
        self.tier
            .parse::<PlanTier>()
            .map_err(|e| FreezeError::invalid_input("tier").with_reason(e))
    }
}

fn parse_range(start: &str, end: &str) -> Result<(Date, Date)> {
    Ok((
        dates::parse_date("start_date", start)?,
        dates::parse_date("end_date", end)?,
    ))
}
