//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data structures carry no
//! presentation logic. Output is markdown.

use std::fmt;

use super::datetime::{DateRange, LocalDateTime};
use crate::{
    allowance::CanCreate,
    models::{
        FreezeScope, HabitWithTasks, HolidayPeriod, HolidayStats, Limit, PeriodState, PeriodView,
        PlanTier, ScopeKind,
    },
};

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PeriodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unlimited => write!(f, "unlimited"),
            Limit::Limited(n) => write!(f, "{n}"),
        }
    }
}

impl fmt::Display for FreezeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreezeScope::All => write!(f, "all habits"),
            FreezeScope::Habits(habits) => {
                let ids: Vec<&str> = habits.iter().map(String::as_str).collect();
                write!(f, "habits {}", ids.join(", "))
            }
            FreezeScope::Tasks(tasks) => {
                let groups: Vec<String> = tasks
                    .iter()
                    .map(|(habit, ids)| {
                        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                        format!("habit {habit} [{}]", ids.join(", "))
                    })
                    .collect();
                write!(f, "tasks of {}", groups.join("; "))
            }
        }
    }
}

impl HolidayPeriod {
    fn fmt_metadata(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Dates: {}", DateRange(self.start_date, self.end_date))?;
        writeln!(f, "- Freezes: {}", self.scope)?;
        if let Some(reason) = &self.reason {
            writeln!(f, "- Reason: {reason}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(deactivated_at) = &self.deactivated_at {
            writeln!(f, "- Cancelled: {}", LocalDateTime(deactivated_at))?;
        }
        Ok(())
    }
}

impl fmt::Display for HolidayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Holiday {}", self.id)?;
        writeln!(f)?;
        self.fmt_metadata(f)?;
        writeln!(f)
    }
}

impl fmt::Display for PeriodView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Holiday {} ({})", self.period.id, self.state.with_icon())?;
        writeln!(f)?;
        self.period.fmt_metadata(f)?;
        match self.state {
            PeriodState::Active | PeriodState::Scheduled => {
                writeln!(f, "- Days remaining: {}", self.days_remaining)?;
            }
            PeriodState::Expired | PeriodState::CancelledEarly => {}
        }
        writeln!(f)
    }
}

impl fmt::Display for HolidayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Holiday usage {}", self.year)?;
        writeln!(f)?;
        writeln!(f, "- **Plan**: {}", self.plan)?;
        writeln!(f, "- **Holidays this year**: {}", self.holidays_this_year)?;
        writeln!(f, "- **Days frozen this year**: {}", self.total_days_this_year)?;
        writeln!(f, "- **Holidays left**: {}", self.remaining_allowance)?;
        match self.max_duration {
            Limit::Unlimited => writeln!(f, "- **Longest holiday**: unlimited")?,
            Limit::Limited(days) => writeln!(f, "- **Longest holiday**: {days} days")?,
        }
        writeln!(
            f,
            "- **Tracking**: {} habits, {} tasks",
            self.total_habits, self.total_tasks
        )
    }
}

impl fmt::Display for HabitWithTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "### {}. {}", self.id, self.name)?;
        if let Some(category) = &self.category {
            write!(f, " ({category})")?;
        }
        writeln!(f)?;
        writeln!(f)?;
        if self.current_streak > 0 {
            writeln!(f, "Streak: {} days", self.current_streak)?;
            writeln!(f)?;
        }
        for task in &self.tasks {
            writeln!(f, "- {}. {}", task.id, task.title)?;
        }
        if !self.tasks.is_empty() {
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for CanCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.can_create {
            return writeln!(f, "A holiday can be created for these dates.");
        }
        writeln!(
            f,
            "Cannot create a holiday: {}",
            self.reason.as_deref().unwrap_or("not allowed")
        )?;
        if self.requires_premium {
            writeln!(f)?;
            writeln!(f, "Upgrade to premium for unlimited holidays of any length.")?;
        }
        Ok(())
    }
}
