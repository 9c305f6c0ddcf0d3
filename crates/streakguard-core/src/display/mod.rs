//! Display formatting for periods, stats and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers so each context
//! can add its own heading or confirmation line. Everything renders as
//! markdown, which the CLI passes through its terminal renderer and the MCP
//! server returns verbatim.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers        │    │   Formatted     │
//! │ (PeriodView,    │───▶│ (Periods,       │───▶│    Output       │
//! │  HolidayStats)  │    │  CreateResult)  │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use streakguard_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Plan tier set to premium".to_string());
//! assert_eq!(status.to_string(), "Success: Plan tier set to premium\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{FrozenDays, Habits, Periods};
pub use datetime::{DateRange, LocalDateTime};
pub use results::{CancelResult, CreateResult};
pub use status::OperationStatus;
