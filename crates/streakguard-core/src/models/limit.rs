//! Explicit "no cap" sentinel for plan allowances.

use serde::{Deserialize, Serialize};

/// A quota that is either capped or unlimited.
///
/// Premium allowances are [`Limit::Unlimited`] rather than `-1` or a very
/// large number, so arithmetic on the remaining allowance stays explicit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    /// No cap
    Unlimited,

    /// At most this many
    Limited(u32),
}

impl Limit {
    /// What is left of this quota after `used` units.
    ///
    /// ```rust
    /// use streakguard_core::models::Limit;
    ///
    /// assert_eq!(Limit::Limited(3).remaining_after(1), Limit::Limited(2));
    /// assert_eq!(Limit::Limited(3).remaining_after(5), Limit::Limited(0));
    /// assert_eq!(Limit::Unlimited.remaining_after(50), Limit::Unlimited);
    /// ```
    pub fn remaining_after(self, used: u32) -> Limit {
        match self {
            Limit::Unlimited => Limit::Unlimited,
            Limit::Limited(cap) => Limit::Limited(cap.saturating_sub(used)),
        }
    }

    /// Whether `amount` fits within the cap.
    pub fn allows(self, amount: u32) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Limited(cap) => amount <= cap,
        }
    }

    /// A capped quota with nothing left.
    pub fn is_exhausted(self) -> bool {
        self == Limit::Limited(0)
    }

    /// The cap, if there is one.
    pub fn cap(self) -> Option<u32> {
        match self {
            Limit::Unlimited => None,
            Limit::Limited(cap) => Some(cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_respects_cap() {
        assert!(Limit::Limited(7).allows(7));
        assert!(!Limit::Limited(7).allows(8));
        assert!(Limit::Unlimited.allows(u32::MAX));
    }

    #[test]
    fn test_exhausted_only_for_zero_cap() {
        assert!(Limit::Limited(0).is_exhausted());
        assert!(!Limit::Limited(1).is_exhausted());
        assert!(!Limit::Unlimited.is_exhausted());
    }

    #[test]
    fn test_serializes_without_magic_numbers() {
        assert_eq!(serde_json::to_string(&Limit::Unlimited).unwrap(), "\"unlimited\"");
        assert_eq!(
            serde_json::to_string(&Limit::Limited(2)).unwrap(),
            "{\"limited\":2}"
        );
    }
}
