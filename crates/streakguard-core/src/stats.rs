//! Yearly holiday usage for display and allowance checks.

use jiff::{civil::Date, tz::TimeZone};

use crate::{
    allowance::AllowancePolicy,
    dates,
    models::{HolidayPeriod, HolidayStats, PlanTier},
};

/// Build the usage summary for the calendar year containing `today`.
///
/// A period counts towards the year it was *created* in (local to `tz`),
/// whatever dates it covers. Cancelled periods still count: the allowance is
/// spent when the period is created. `habit_counts` is `(habits, tasks)`
/// and is passed through untouched.
pub fn aggregate(
    periods: &[HolidayPeriod],
    tier: PlanTier,
    policy: &AllowancePolicy,
    today: Date,
    tz: &TimeZone,
    habit_counts: (u32, u32),
) -> HolidayStats {
    let year = today.year();
    let (holidays_this_year, total_days_this_year) = periods
        .iter()
        .filter(|period| dates::local_date(period.created_at, tz).year() == year)
        .fold((0u32, 0u32), |(count, days), period| {
            (count + 1, days.saturating_add(period.duration_days()))
        });

    let allowance = policy.for_tier(tier);
    let (total_habits, total_tasks) = habit_counts;

    HolidayStats {
        plan: tier,
        year,
        holidays_this_year,
        total_days_this_year,
        remaining_allowance: allowance.periods_per_year.remaining_after(holidays_this_year),
        max_duration: allowance.max_days_per_period,
        total_habits,
        total_tasks,
    }
}
