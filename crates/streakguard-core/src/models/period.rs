//! Holiday period model and its derived fields.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use super::{FreezeScope, PeriodState};
use crate::dates;

/// A user-declared date range during which streak-breaking is suspended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HolidayPeriod {
    /// Unique identifier for the period
    pub id: u64,

    /// Owner of the period
    pub user_id: String,

    /// First frozen day (inclusive)
    pub start_date: Date,

    /// Last planned frozen day (inclusive)
    pub end_date: Date,

    /// Which habits or tasks are frozen
    pub scope: FreezeScope,

    /// Optional free-text note, purely informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Timestamp when the period was created (UTC)
    pub created_at: Timestamp,

    /// False once the period expired or was cancelled
    pub is_active: bool,

    /// Set only when the period was cancelled before its end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<Timestamp>,
}

impl HolidayPeriod {
    /// Lifecycle state of the period as seen on `today`.
    pub fn state(&self, today: Date) -> PeriodState {
        if self.deactivated_at.is_some() {
            PeriodState::CancelledEarly
        } else if today > self.end_date || !self.is_active {
            PeriodState::Expired
        } else if today < self.start_date {
            PeriodState::Scheduled
        } else {
            PeriodState::Active
        }
    }

    /// Whether the period still occupies the user's single active slot.
    ///
    /// Scheduled periods count; periods past their end date do not, even
    /// before the store has lazily cleared `is_active`.
    pub fn is_current(&self, today: Date) -> bool {
        self.is_active && self.deactivated_at.is_none() && today <= self.end_date
    }

    /// Planned length in days, inclusive.
    pub fn duration_days(&self) -> u32 {
        dates::duration(self.start_date, self.end_date)
    }

    /// Days left until the planned end date.
    pub fn days_remaining(&self, today: Date) -> u32 {
        dates::days_remaining(self.end_date, today)
    }

    /// The last day this period actually froze.
    ///
    /// For a period that ran its course this is `end_date`. For a period
    /// cancelled early it is the day before the cancellation day (in `tz`),
    /// capped at `end_date`. Returns `None` when the cancellation happened on
    /// or before `start_date`, i.e. the period never froze anything.
    pub fn effective_end_date(&self, tz: &TimeZone) -> Option<Date> {
        let end = match self.deactivated_at {
            None => self.end_date,
            Some(deactivated_at) => {
                let last_frozen = dates::local_date(deactivated_at, tz).yesterday().ok()?;
                last_frozen.min(self.end_date)
            }
        };
        (end >= self.start_date).then_some(end)
    }
}

/// A period together with the fields derived at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodView {
    #[serde(flatten)]
    pub period: HolidayPeriod,

    /// Lifecycle state on the day the view was built
    pub state: PeriodState,

    /// Days left until the planned end date
    pub days_remaining: u32,

    /// Planned length in days, inclusive
    pub duration_days: u32,
}

impl PeriodView {
    /// Derive the read-time fields of `period` for `today`.
    pub fn new(period: HolidayPeriod, today: Date) -> Self {
        Self {
            state: period.state(today),
            days_remaining: period.days_remaining(today),
            duration_days: period.duration_days(),
            period,
        }
    }
}
