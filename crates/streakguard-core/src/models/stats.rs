//! Yearly holiday usage summary.

use serde::{Deserialize, Serialize};

use super::{Limit, PlanTier};

/// Derived holiday usage for one user and one calendar year.
///
/// Never persisted; rebuilt from the period history on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HolidayStats {
    /// Plan tier the allowance was computed for
    pub plan: PlanTier,

    /// Calendar year the counts cover
    pub year: i16,

    /// Periods created this calendar year
    pub holidays_this_year: u32,

    /// Sum of the planned durations of those periods
    pub total_days_this_year: u32,

    /// Periods the user may still create this year
    pub remaining_allowance: Limit,

    /// Longest single period the plan allows, in days
    pub max_duration: Limit,

    /// Active habits of the user (display only)
    pub total_habits: u32,

    /// Tasks across those habits (display only)
    pub total_tasks: u32,
}
