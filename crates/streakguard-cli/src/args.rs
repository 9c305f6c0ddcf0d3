//! Command-line interface definitions using clap
//!
//! CLI argument structures wrap the core parameter types: clap concerns
//! (flags, help text, value delimiters) live here, and each wrapper converts
//! into the matching `streakguard_core::params` type together with the
//! user selected by the global `--user` flag.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → HolidayService
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use streakguard_core::{
    models::FrozenTaskEntry,
    params::{
        AddHabit, AddTask, CanCreateParams, CancelPeriod, CreatePeriod, FrozenQuery, SetTier,
    },
};

/// Plan holidays for your habits without breaking your streaks
///
/// A holiday freezes every habit, a set of habits, or individual tasks for a
/// date range: missed days inside the range do not reset a streak. The CLI
/// manages holidays locally and can serve the same operations over MCP.
#[derive(Parser)]
#[command(version, about, name = "streakguard")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/streakguard/streakguard.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User whose holidays to manage
    #[arg(long, global = true, default_value = "default")]
    pub user: String,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<Date>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `holiday`: create, inspect and cancel holiday periods
/// - `habit`: maintain the habit catalog that scopes refer to
/// - `tier`: show or change the plan tier
/// - `check`: ask whether a day was frozen
/// - `serve`: start the MCP server
#[derive(Subcommand)]
pub enum Commands {
    /// Manage holiday periods
    #[command(alias = "h")]
    Holiday {
        #[command(subcommand)]
        command: HolidayCommands,
    },
    /// Manage habits and their tasks
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
    /// Show or change the plan tier
    Tier {
        #[command(subcommand)]
        command: TierCommands,
    },
    /// Check whether a day was frozen
    #[command(alias = "c")]
    Check(CheckArgs),
    /// Start the MCP server
    Serve,
}

#[derive(Subcommand)]
pub enum HolidayCommands {
    /// Show the active or scheduled holiday
    #[command(alias = "a")]
    Active(OutputArgs),
    /// List every holiday, most recent first
    #[command(aliases = ["l", "ls"])]
    History(OutputArgs),
    /// Check whether a holiday could be created for a date range
    CanCreate(CanCreateArgs),
    /// Create a holiday
    #[command(alias = "c")]
    Create(CreateArgs),
    /// Cancel the active holiday
    #[command(aliases = ["x", "rm"])]
    Cancel(CancelArgs),
    /// Show this year's holiday usage and allowance
    #[command(alias = "s")]
    Stats(OutputArgs),
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// List habits with their tasks
    #[command(aliases = ["l", "ls"])]
    List(OutputArgs),
    /// Add a habit
    #[command(alias = "a")]
    Add(AddHabitArgs),
    /// Add a task to a habit
    #[command(alias = "t")]
    AddTask(AddTaskArgs),
}

#[derive(Subcommand)]
pub enum TierCommands {
    /// Show the current plan tier
    Show,
    /// Change the plan tier
    Set(SetTierArgs),
}

/// Output selection for read commands
#[derive(ClapArgs)]
pub struct OutputArgs {
    /// Print JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

/// Date range for the allowance pre-check
#[derive(ClapArgs)]
pub struct CanCreateArgs {
    /// First frozen day (YYYY-MM-DD)
    pub start_date: String,
    /// Last frozen day (YYYY-MM-DD)
    pub end_date: String,
    /// Print JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

impl CanCreateArgs {
    pub fn into_params(self, user_id: String) -> CanCreateParams {
        CanCreateParams {
            user_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// What a new holiday freezes
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Every habit and task
    All,
    /// Whole habits given with --habit
    Habits,
    /// Individual tasks given with --task
    Tasks,
}

impl ScopeArg {
    fn as_str(self) -> &'static str {
        match self {
            ScopeArg::All => "all",
            ScopeArg::Habits => "habits",
            ScopeArg::Tasks => "tasks",
        }
    }
}

/// Create a holiday
///
/// Without --scope, the scope follows the selection: --task entries make a
/// tasks holiday, --habit entries a habits holiday, and neither freezes
/// everything.
#[derive(ClapArgs)]
pub struct CreateArgs {
    /// First frozen day (YYYY-MM-DD)
    pub start_date: String,
    /// Last frozen day (YYYY-MM-DD)
    pub end_date: String,
    /// What the holiday freezes
    #[arg(short, long, value_enum)]
    pub scope: Option<ScopeArg>,
    /// Habits to freeze - comma-separated list of habit IDs
    #[arg(long = "habit", value_delimiter = ',')]
    pub habits: Vec<String>,
    /// Tasks to freeze as HABIT:TASK[,TASK...]; repeat per habit
    #[arg(long = "task")]
    pub tasks: Vec<String>,
    /// Optional note, e.g. "Family trip"
    #[arg(short, long)]
    pub reason: Option<String>,
}

impl CreateArgs {
    pub fn into_params(self, user_id: String) -> Result<CreatePeriod> {
        let scope = self.scope.unwrap_or(if !self.tasks.is_empty() {
            ScopeArg::Tasks
        } else if !self.habits.is_empty() {
            ScopeArg::Habits
        } else {
            ScopeArg::All
        });

        let frozen_tasks = self
            .tasks
            .iter()
            .map(String::as_str)
            .map(parse_task_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(CreatePeriod {
            user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            scope: scope.as_str().to_string(),
            frozen_habits: self.habits,
            frozen_tasks,
            reason: self.reason,
        })
    }
}

/// Parse `HABIT:TASK[,TASK...]`.
fn parse_task_entry(entry: &str) -> Result<FrozenTaskEntry> {
    let (habit_id, tasks) = entry
        .split_once(':')
        .with_context(|| format!("Invalid task selection '{entry}', expected HABIT:TASK[,TASK...]"))?;
    let habit_id = habit_id.trim();
    if habit_id.is_empty() {
        bail!("Invalid task selection '{entry}': missing habit ID");
    }

    Ok(FrozenTaskEntry {
        habit_id: habit_id.to_string(),
        task_ids: tasks
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
    })
}

/// Cancel a holiday
#[derive(ClapArgs)]
pub struct CancelArgs {
    /// ID of the holiday to cancel
    pub id: u64,
}

impl CancelArgs {
    pub fn into_params(self, user_id: String) -> CancelPeriod {
        CancelPeriod {
            user_id,
            id: self.id,
        }
    }
}

/// Add a habit
#[derive(ClapArgs)]
pub struct AddHabitArgs {
    /// Name of the habit
    pub name: String,
    /// Optional grouping label
    #[arg(short, long)]
    pub category: Option<String>,
}

impl AddHabitArgs {
    pub fn into_params(self, user_id: String) -> AddHabit {
        AddHabit {
            user_id,
            name: self.name,
            category: self.category,
        }
    }
}

/// Add a task to a habit
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// ID of the habit to extend
    pub habit_id: String,
    /// Short label of the task
    pub title: String,
}

impl AddTaskArgs {
    pub fn into_params(self, user_id: String) -> AddTask {
        AddTask {
            user_id,
            habit_id: self.habit_id,
            title: self.title,
        }
    }
}

/// Change the plan tier
#[derive(ClapArgs)]
pub struct SetTierArgs {
    /// 'free' or 'premium'
    pub tier: String,
}

impl SetTierArgs {
    pub fn into_params(self, user_id: String) -> SetTier {
        SetTier {
            user_id,
            tier: self.tier,
        }
    }
}

/// Check whether a day was frozen
///
/// With --until, lists every frozen day of the range instead.
#[derive(ClapArgs)]
pub struct CheckArgs {
    /// Day to check (YYYY-MM-DD)
    pub date: String,
    /// Last day of a range to list (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,
    /// Habit the day belongs to
    #[arg(long)]
    pub habit: Option<String>,
    /// Tasks due that day - comma-separated list of task IDs
    #[arg(long = "task", value_delimiter = ',', requires = "habit")]
    pub tasks: Vec<String>,
    /// Print JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn into_params(self, user_id: String) -> FrozenQuery {
        FrozenQuery {
            user_id,
            date: self.date,
            until: self.until,
            habit_id: self.habit,
            task_ids: self.tasks,
        }
    }
}
