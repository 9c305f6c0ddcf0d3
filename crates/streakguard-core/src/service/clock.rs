//! Source of "today" and "now".

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Where the service reads the current date and time from.
#[derive(Debug, Clone)]
pub enum Clock {
    /// Wall clock, with calendar dates taken in the given time zone
    System(TimeZone),

    /// A pinned calendar day; "now" is noon of that day in `tz`
    Fixed { today: Date, tz: TimeZone },
}

impl Clock {
    /// Wall clock in the system time zone.
    pub fn system() -> Self {
        Clock::System(TimeZone::system())
    }

    /// A pinned day in UTC.
    pub fn fixed(today: Date) -> Self {
        Clock::Fixed {
            today,
            tz: TimeZone::UTC,
        }
    }

    /// Time zone calendar dates are resolved in.
    pub fn time_zone(&self) -> &TimeZone {
        match self {
            Clock::System(tz) | Clock::Fixed { tz, .. } => tz,
        }
    }

    pub fn today(&self) -> Date {
        match self {
            Clock::System(tz) => Timestamp::now().to_zoned(tz.clone()).date(),
            Clock::Fixed { today, .. } => *today,
        }
    }

    pub fn now(&self) -> Timestamp {
        match self {
            Clock::System(_) => Timestamp::now(),
            Clock::Fixed { today, tz } => today
                .at(12, 0, 0, 0)
                .to_zoned(tz.clone())
                .map(|zoned| zoned.timestamp())
                .unwrap_or_else(|_| Timestamp::now()),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
