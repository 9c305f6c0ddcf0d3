//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use crate::models::{HabitWithTasks, PeriodView};

/// Newtype wrapper for displaying a holiday history.
///
/// # Examples
///
/// ```rust
/// use streakguard_core::display::Periods;
///
/// let history = Periods(Vec::new());
/// assert_eq!(history.to_string(), "No holidays found.\n");
/// ```
pub struct Periods(pub Vec<PeriodView>);

impl Periods {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodView> {
        self.0.iter()
    }
}

impl Index<usize> for Periods {
    type Output = PeriodView;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Periods {
    type Item = &'a PeriodView;
    type IntoIter = std::slice::Iter<'a, PeriodView>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Periods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No holidays found.");
        }
        for period in &self.0 {
            write!(f, "{period}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the habit catalog.
pub struct Habits(pub Vec<HabitWithTasks>);

impl Habits {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Habits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No habits found.");
        }
        for habit in &self.0 {
            write!(f, "{habit}")?;
        }
        Ok(())
    }
}

/// Frozen days of a range query, one per line.
pub struct FrozenDays(pub Vec<Date>);

impl fmt::Display for FrozenDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No frozen days in this range.");
        }
        writeln!(f, "{} frozen days:", self.0.len())?;
        writeln!(f)?;
        for day in &self.0 {
            writeln!(f, "- {day}")?;
        }
        Ok(())
    }
}
