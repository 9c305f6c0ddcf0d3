//! Day-granularity date arithmetic.
//!
//! Every function here works on naive calendar dates ([`jiff::civil::Date`])
//! and takes "today" as an argument. Nothing in this module reads the system
//! clock, so results never depend on the caller's timezone or the moment a
//! test happens to run. Instants are turned into calendar days only through
//! [`local_date`], with an explicit [`TimeZone`].

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use crate::error::{FreezeError, Result};

/// Whole days from `start` to `end` (negative when `end` is earlier).
pub(crate) fn days_between(start: Date, end: Date) -> i64 {
    i64::from((end - start).get_days())
}

/// Days left until `end_date`, never negative.
///
/// An end date of today or earlier yields 0.
///
/// ```rust
/// use jiff::civil::date;
/// use streakguard_core::dates::days_remaining;
///
/// let today = date(2025, 1, 10);
/// assert_eq!(days_remaining(date(2025, 1, 20), today), 10);
/// assert_eq!(days_remaining(today, today), 0);
/// assert_eq!(days_remaining(date(2025, 1, 1), today), 0);
/// ```
pub fn days_remaining(end_date: Date, today: Date) -> u32 {
    u32::try_from(days_between(today, end_date).max(0)).unwrap_or(u32::MAX)
}

/// Inclusive day count of `[start, end]`.
///
/// Returns 0 for an inverted range.
///
/// ```rust
/// use jiff::civil::date;
/// use streakguard_core::dates::duration;
///
/// assert_eq!(duration(date(2025, 1, 10), date(2025, 1, 10)), 1);
/// assert_eq!(duration(date(2025, 1, 10), date(2025, 1, 20)), 11);
/// ```
pub fn duration(start: Date, end: Date) -> u32 {
    u32::try_from((days_between(start, end) + 1).max(0)).unwrap_or(u32::MAX)
}

/// Whether `date` lies in `[start, end]`, inclusive on both ends.
///
/// Civil dates order exactly like their `YYYY-MM-DD` text form, so this is
/// the same comparison as on the stored strings.
pub fn is_in_range(date: Date, start: Date, end: Date) -> bool {
    start <= date && date <= end
}

/// The calendar day `timestamp` falls on in `tz`.
pub fn local_date(timestamp: Timestamp, tz: &TimeZone) -> Date {
    timestamp.to_zoned(tz.clone()).date()
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(FreezeError::invalid_input(field)
            .with_reason(format!("'{value}' is not a YYYY-MM-DD date")));
    }

    value.parse::<Date>().map_err(|e| {
        FreezeError::invalid_input(field).with_reason(format!("'{value}' is not a valid date: {e}"))
    })
}

/// Every date in `[start, end]`, in order.
pub fn each_day(start: Date, end: Date) -> impl Iterator<Item = Date> {
    let mut next = (start <= end).then_some(start);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current < end {
            current.tomorrow().ok()
        } else {
            None
        };
        Some(current)
    })
}
