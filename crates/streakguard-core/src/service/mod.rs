//! High-level holiday API.
//!
//! [`HolidayService`] is the single entry point used by the CLI and the MCP
//! server. It owns no connection: every operation opens the database on a
//! blocking worker, runs one store call and returns.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │ HolidayService  │    │    Database     │
//! │  (params)       │───▶│ (clock, policy) │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                │
//!                                ▼
//!                 freeze / allowance / stats (pure)
//! ```
//!
//! "Today" always comes from the configured [`Clock`], never from the
//! wall clock directly, so every date-dependent rule can be tested.
//!
//! ```rust
//! use jiff::civil::date;
//! use streakguard_core::{params::{CreatePeriod, UserParams}, Clock, HolidayServiceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HolidayServiceBuilder::new()
//!     .with_database_path(Some("holidays.db"))
//!     .with_clock(Clock::fixed(date(2025, 7, 1)))
//!     .build()
//!     .await?;
//!
//! let period = service
//!     .create_period(&CreatePeriod {
//!         user_id: "alice".to_string(),
//!         start_date: "2025-07-01".to_string(),
//!         end_date: "2025-07-05".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{period}");
//!
//! let stats = service.get_stats(&UserParams { user_id: "alice".to_string() }).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::civil::Date;
use tokio::task;

use crate::{
    allowance::AllowancePolicy,
    db::Database,
    error::{FreezeError, Result},
};

pub mod builder;
pub mod clock;
pub mod habit_ops;
pub mod period_ops;

#[cfg(test)]
mod tests;

pub use builder::HolidayServiceBuilder;
pub use clock::Clock;

/// Main service interface for holiday periods and the habit catalog.
pub struct HolidayService {
    pub(crate) db_path: PathBuf,
    pub(crate) clock: Clock,
    pub(crate) policy: AllowancePolicy,
}

impl HolidayService {
    pub(crate) fn new(db_path: PathBuf, clock: Clock, policy: AllowancePolicy) -> Self {
        Self {
            db_path,
            clock,
            policy,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn policy(&self) -> &AllowancePolicy {
        &self.policy
    }

    /// Today's date according to the configured clock.
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Run `op` against a freshly opened database on a blocking worker.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| FreezeError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
