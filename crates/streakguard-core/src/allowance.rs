//! Plan allowances and the pre-creation validator.
//!
//! The validator is stateless: all usage arithmetic comes from a
//! [`HolidayStats`] snapshot built by [`crate::stats::aggregate`]. The store
//! repeats the count check inside its creation transaction, so a passing
//! [`CanCreate`] is advisory until the insert commits.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    dates,
    error::{FreezeError, Result},
    models::{FreezeScope, HolidayStats, Limit, PlanTier},
};

/// Quotas granted by one plan tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierAllowance {
    /// Periods a user may create per calendar year
    pub periods_per_year: Limit,

    /// Longest single period, in days
    pub max_days_per_period: Limit,
}

/// Quotas for every plan tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowancePolicy {
    pub free: TierAllowance,
    pub premium: TierAllowance,
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self {
            free: TierAllowance {
                periods_per_year: Limit::Limited(3),
                max_days_per_period: Limit::Limited(7),
            },
            premium: TierAllowance {
                periods_per_year: Limit::Unlimited,
                max_days_per_period: Limit::Unlimited,
            },
        }
    }
}

impl AllowancePolicy {
    /// Quotas for `tier`.
    pub fn for_tier(&self, tier: PlanTier) -> TierAllowance {
        match tier {
            PlanTier::Free => self.free,
            PlanTier::Premium => self.premium,
        }
    }
}

/// Outcome of an allowance check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct CanCreate {
    /// Whether a period with these dates may be created
    pub can_create: bool,

    /// Why not, when `can_create` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Upgrading the plan would lift the restriction
    #[serde(default)]
    pub requires_premium: bool,
}

impl CanCreate {
    fn allowed() -> Self {
        Self {
            can_create: true,
            reason: None,
            requires_premium: false,
        }
    }

    /// Turn a rejection back into the [`FreezeError`] it came from.
    ///
    /// ```rust
    /// use jiff::civil::date;
    /// use streakguard_core::allowance::Validator;
    /// use streakguard_core::models::{HolidayStats, Limit, PlanTier};
    ///
    /// let stats = HolidayStats {
    ///     plan: PlanTier::Free,
    ///     year: 2025,
    ///     holidays_this_year: 3,
    ///     total_days_this_year: 12,
    ///     remaining_allowance: Limit::Limited(0),
    ///     max_duration: Limit::Limited(7),
    ///     total_habits: 4,
    ///     total_tasks: 9,
    /// };
    /// let today = date(2025, 6, 1);
    /// let outcome = Validator::check_range(&stats, today, date(2025, 6, 3), today);
    ///
    /// assert!(!outcome.can_create);
    /// assert!(outcome.into_result().unwrap_err().requires_premium());
    /// ```
    pub fn into_result(self) -> Result<()> {
        if self.can_create {
            return Ok(());
        }
        let reason = self.reason.unwrap_or_default();
        if self.requires_premium {
            Err(FreezeError::AllowanceExceeded {
                reason,
                requires_premium: true,
            })
        } else {
            Err(FreezeError::invalid_range(reason))
        }
    }
}

impl From<FreezeError> for CanCreate {
    fn from(err: FreezeError) -> Self {
        let requires_premium = err.requires_premium();
        let reason = match err {
            FreezeError::InvalidDateRange { reason } => reason,
            FreezeError::AllowanceExceeded { reason, .. } => reason,
            other => other.to_string(),
        };
        Self {
            can_create: false,
            reason: Some(reason),
            requires_premium,
        }
    }
}

/// Pre-creation checks over a usage snapshot.
pub struct Validator;

impl Validator {
    /// Date-range and plan checks, without looking at the scope.
    pub fn check_range(stats: &HolidayStats, start: Date, end: Date, today: Date) -> CanCreate {
        match Self::range_result(stats, start, end, today) {
            Ok(()) => CanCreate::allowed(),
            Err(err) => err.into(),
        }
    }

    /// Full check for a creation request: range, plan, then scope.
    ///
    /// # Errors
    ///
    /// * `FreezeError::InvalidDateRange` - end before start or a past start
    /// * `FreezeError::AllowanceExceeded` - count or duration over the plan
    /// * `FreezeError::EmptySelection` - a habits/tasks scope naming nothing
    pub fn check(
        stats: &HolidayStats,
        start: Date,
        end: Date,
        scope: &FreezeScope,
        today: Date,
    ) -> Result<()> {
        Self::range_result(stats, start, end, today)?;
        scope.validate()
    }

    /// Date-only part of the check, usable before any store access.
    ///
    /// # Errors
    ///
    /// * `FreezeError::InvalidDateRange` - end before start or a past start
    pub fn check_dates(start: Date, end: Date, today: Date) -> Result<()> {
        if end < start {
            return Err(FreezeError::invalid_range(format!(
                "end date {end} is before start date {start}"
            )));
        }
        if start < today {
            return Err(FreezeError::invalid_range(format!(
                "start date {start} is in the past; holidays can only be planned from {today}"
            )));
        }
        Ok(())
    }

    fn range_result(stats: &HolidayStats, start: Date, end: Date, today: Date) -> Result<()> {
        Self::check_dates(start, end, today)?;

        if stats.remaining_allowance.is_exhausted() {
            return Err(FreezeError::AllowanceExceeded {
                reason: format!(
                    "all {} holidays for {} are used",
                    stats.holidays_this_year, stats.year
                ),
                requires_premium: true,
            });
        }

        let requested = dates::duration(start, end);
        if !stats.max_duration.allows(requested) {
            let cap = stats.max_duration.cap().unwrap_or_default();
            return Err(FreezeError::AllowanceExceeded {
                reason: format!("{requested} days requested but the plan allows at most {cap}"),
                requires_premium: true,
            });
        }
        Ok(())
    }
}
