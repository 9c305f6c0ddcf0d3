//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{HabitWithTasks, PeriodView, TaskInfo};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use streakguard_core::{
///     display::CreateResult,
///     models::{FreezeScope, HolidayPeriod, PeriodView},
/// };
///
/// let period = HolidayPeriod {
///     id: 3,
///     user_id: "alice".to_string(),
///     start_date: date(2025, 8, 1),
///     end_date: date(2025, 8, 3),
///     scope: FreezeScope::All,
///     reason: None,
///     created_at: Timestamp::UNIX_EPOCH,
///     is_active: true,
///     deactivated_at: None,
/// };
/// let result = CreateResult::new(PeriodView::new(period, date(2025, 7, 30)));
/// assert!(result.to_string().starts_with("Created holiday with ID: 3"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<PeriodView> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created holiday with ID: {}", self.resource.period.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<HabitWithTasks> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created habit with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<TaskInfo> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created task with ID: {} ({})",
            self.resource.id, self.resource.title
        )
    }
}

/// Wrapper type for displaying a cancelled holiday.
pub struct CancelResult(pub PeriodView);

impl fmt::Display for CancelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cancelled holiday with ID: {}", self.0.period.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "Days from today on count towards streaks again; earlier days stay frozen."
        )?;
        writeln!(f)?;
        write!(f, "{}", self.0)
    }
}
