//! Date and time display helpers.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use crate::dates;

/// A timestamp shown in the system time zone as `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

/// An inclusive date range with its length, e.g.
/// `2025-01-10 → 2025-01-20 (11 days)`.
pub struct DateRange(pub Date, pub Date);

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = dates::duration(self.0, self.1);
        let unit = if days == 1 { "day" } else { "days" };
        if self.0 == self.1 {
            write!(f, "{} ({days} {unit})", self.0)
        } else {
            write!(f, "{} → {} ({days} {unit})", self.0, self.1)
        }
    }
}
