//! Persisted shape of a holiday period.
//!
//! On the wire the three-valued scope is an `applies_to_all` flag plus two
//! nullable collections. Exactly one representation may be populated; the
//! conversion into [`HolidayPeriod`] enforces that and rejects anything else
//! instead of guessing.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{FreezeScope, HabitId, HolidayPeriod, TaskId};
use crate::{
    dates,
    error::{FreezeError, Result},
};

/// Tasks frozen for one habit, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct FrozenTaskEntry {
    pub habit_id: HabitId,
    pub task_ids: Vec<TaskId>,
}

/// A holiday period row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodRecord {
    pub id: u64,
    pub user_id: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    pub applies_to_all: bool,
    pub frozen_habits: Option<Vec<HabitId>>,
    pub frozen_tasks: Option<Vec<FrozenTaskEntry>>,
    pub reason: Option<String>,
    pub created_at: String,
    pub is_active: bool,
    pub deactivated_at: Option<String>,
}

impl PeriodRecord {
    /// Split a scope into the three stored columns.
    pub fn scope_columns(
        scope: &FreezeScope,
    ) -> (bool, Option<Vec<HabitId>>, Option<Vec<FrozenTaskEntry>>) {
        match scope {
            FreezeScope::All => (true, None, None),
            FreezeScope::Habits(habits) => (false, Some(habits.iter().cloned().collect()), None),
            FreezeScope::Tasks(tasks) => (
                false,
                None,
                Some(
                    tasks
                        .iter()
                        .map(|(habit_id, task_ids)| FrozenTaskEntry {
                            habit_id: habit_id.clone(),
                            task_ids: task_ids.iter().cloned().collect(),
                        })
                        .collect(),
                ),
            ),
        }
    }

    /// Rebuild the scope from the stored columns.
    ///
    /// # Errors
    ///
    /// * `FreezeError::InvalidInput` - when more than one representation is
    ///   populated, or none is
    /// * `FreezeError::EmptySelection` - when the populated collection is
    ///   empty
    pub fn scope(&self) -> Result<FreezeScope> {
        let scope = match (
            self.applies_to_all,
            &self.frozen_habits,
            &self.frozen_tasks,
        ) {
            (true, None, None) => FreezeScope::All,
            (false, Some(habits), None) => FreezeScope::habits(habits.iter().cloned()),
            (false, None, Some(tasks)) => FreezeScope::tasks(
                tasks
                    .iter()
                    .map(|entry| (entry.habit_id.clone(), entry.task_ids.iter().cloned())),
            ),
            (false, None, None) => {
                return Err(FreezeError::invalid_input("scope")
                    .with_reason(format!("period {} has no scope populated", self.id)));
            }
            _ => {
                return Err(FreezeError::invalid_input("scope").with_reason(format!(
                    "period {} has more than one scope representation populated",
                    self.id
                )));
            }
        };
        scope.validate()?;
        Ok(scope)
    }
}

impl From<&HolidayPeriod> for PeriodRecord {
    fn from(period: &HolidayPeriod) -> Self {
        let (applies_to_all, frozen_habits, frozen_tasks) = Self::scope_columns(&period.scope);
        Self {
            id: period.id,
            user_id: period.user_id.clone(),
            start_date: period.start_date.to_string(),
            end_date: period.end_date.to_string(),
            applies_to_all,
            frozen_habits,
            frozen_tasks,
            reason: period.reason.clone(),
            created_at: period.created_at.to_string(),
            is_active: period.is_active,
            deactivated_at: period.deactivated_at.map(|ts| ts.to_string()),
        }
    }
}

impl TryFrom<PeriodRecord> for HolidayPeriod {
    type Error = FreezeError;

    fn try_from(record: PeriodRecord) -> Result<Self> {
        let scope = record.scope()?;
        let start_date = dates::parse_date("start_date", &record.start_date)?;
        let end_date = dates::parse_date("end_date", &record.end_date)?;
        if end_date < start_date {
            return Err(FreezeError::invalid_range(format!(
                "period {} ends ({end_date}) before it starts ({start_date})",
                record.id
            )));
        }

        Ok(HolidayPeriod {
            id: record.id,
            user_id: record.user_id,
            start_date,
            end_date,
            scope,
            reason: record.reason,
            created_at: parse_timestamp("created_at", &record.created_at)?,
            is_active: record.is_active,
            deactivated_at: record
                .deactivated_at
                .as_deref()
                .map(|ts| parse_timestamp("deactivated_at", ts))
                .transpose()?,
        })
    }
}

fn parse_timestamp(field: &str, value: &str) -> Result<Timestamp> {
    value.parse::<Timestamp>().map_err(|e| {
        FreezeError::invalid_input(field).with_reason(format!("'{value}' is not a timestamp: {e}"))
    })
}
