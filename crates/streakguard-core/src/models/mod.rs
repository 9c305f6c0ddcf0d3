//! Data models for holiday periods, freeze scopes and allowances.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use streakguard_core::models::{FreezeScope, HolidayPeriod, PeriodState};
//!
//! let period = HolidayPeriod {
//!     id: 1,
//!     user_id: "alice".to_string(),
//!     start_date: date(2025, 1, 10),
//!     end_date: date(2025, 1, 20),
//!     scope: FreezeScope::All,
//!     reason: Some("Family trip".to_string()),
//! #   created_at: jiff::Timestamp::UNIX_EPOCH,
//! #   is_active: true,
//! #   deactivated_at: None,
//! };
//!
//! assert_eq!(period.duration_days(), 11);
//! assert_eq!(period.state(date(2025, 1, 15)), PeriodState::Active);
//! ```

pub mod habit;
pub mod limit;
pub mod period;
pub mod record;
pub mod scope;
pub mod stats;
pub mod status;

#[cfg(test)]
mod tests;

pub use habit::{HabitWithTasks, TaskInfo};
pub use limit::Limit;
pub use period::{HolidayPeriod, PeriodView};
pub use record::{FrozenTaskEntry, PeriodRecord};
pub use scope::{FreezeScope, FrozenTasks, HabitId, ScopeKind, TaskId};
pub use stats::HolidayStats;
pub use status::{PeriodState, PlanTier};
