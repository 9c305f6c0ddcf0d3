//! Core library for StreakGuard holiday periods.
//!
//! A holiday period is a date range during which a user's habit streaks are
//! frozen: missed days inside the range do not break a streak. This crate
//! holds the freeze rules, the per-tier allowance checks, the SQLite store
//! and an async service that ties them together for the CLI and MCP server.
//!
//! # Layers
//!
//! - **Rules** ([`freeze`], [`allowance`], [`stats`], [`dates`]): pure
//!   functions over periods and dates, no I/O
//! - **Store** ([`db`]): SQLite persistence with the one-active-period
//!   invariant enforced in a transaction and by a partial unique index
//! - **Service** ([`service`]): async operations that validate input, open
//!   the store and return view models
//! - **Display** ([`display`]): markdown formatting for every result
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use streakguard_core::{
//!     params::{CreatePeriod, UserParams},
//!     Clock, HolidayServiceBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HolidayServiceBuilder::new()
//!     .with_database_path(Some("holidays.db"))
//!     .with_clock(Clock::fixed(date(2025, 1, 8)))
//!     .build()
//!     .await?;
//!
//! let period = service
//!     .create_period(&CreatePeriod {
//!         user_id: "alice".to_string(),
//!         start_date: "2025-01-10".to_string(),
//!         end_date: "2025-01-14".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{period}");
//!
//! let stats = service
//!     .get_stats(&UserParams {
//!         user_id: "alice".to_string(),
//!     })
//!     .await?;
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```

pub mod allowance;
pub mod dates;
pub mod db;
pub mod display;
pub mod error;
pub mod freeze;
pub mod models;
pub mod params;
pub mod selection;
pub mod service;
pub mod stats;

// Re-export commonly used types
pub use allowance::{AllowancePolicy, CanCreate, TierAllowance, Validator};
pub use db::Database;
pub use display::{
    CancelResult, CreateResult, DateRange, FrozenDays, Habits, LocalDateTime, OperationStatus,
    Periods,
};
pub use error::{FreezeError, Result};
pub use freeze::FreezeTarget;
pub use models::{
    FreezeScope, HabitWithTasks, HolidayPeriod, HolidayStats, Limit, PeriodState, PeriodView,
    PlanTier, TaskInfo,
};
pub use params::{
    AddHabit, AddTask, CanCreateParams, CancelPeriod, CreatePeriod, FrozenQuery, SetTier,
    UserParams,
};
pub use selection::SelectionState;
pub use service::{Clock, HolidayService, HolidayServiceBuilder};
