//! Status enumerations for plan tiers and holiday periods.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Subscription tier that decides a user's holiday allowance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Capped number of short holidays per year
    #[default]
    Free,

    /// No caps on count or duration
    Premium,
}

impl FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "premium" | "pro" => Ok(PlanTier::Premium),
            _ => Err(format!("Invalid plan tier: {s}")),
        }
    }
}

impl PlanTier {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Premium => "premium",
        }
    }
}

/// Where a holiday period sits in its lifecycle on a given day.
///
/// ```text
/// Scheduled ──▶ Active ──▶ Expired
///     │            │
///     └────────────┴─────▶ CancelledEarly
/// ```
///
/// `Expired` and `CancelledEarly` are terminal. Only `CancelledEarly` moves
/// the effective end date of a period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PeriodState {
    /// Start date is still in the future
    Scheduled,

    /// Today lies within `[start, end]`
    Active,

    /// Today is past the end date
    Expired,

    /// The user ended the period before its end date
    CancelledEarly,
}

impl PeriodState {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodState::Scheduled => "scheduled",
            PeriodState::Active => "active",
            PeriodState::Expired => "expired",
            PeriodState::CancelledEarly => "cancelled_early",
        }
    }

    /// Terminal states never become current again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PeriodState::Expired | PeriodState::CancelledEarly)
    }

    /// Get state with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use streakguard_core::models::PeriodState;
    ///
    /// assert_eq!(PeriodState::Active.with_icon(), "❄ Active");
    /// assert_eq!(PeriodState::Scheduled.with_icon(), "○ Scheduled");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PeriodState::Scheduled => "○ Scheduled",
            PeriodState::Active => "❄ Active",
            PeriodState::Expired => "✓ Expired",
            PeriodState::CancelledEarly => "✗ Cancelled early",
        }
    }
}
