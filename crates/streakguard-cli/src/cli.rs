//! Command handlers for the CLI
//!
//! Each handler calls one [`HolidayService`] operation and renders the result
//! as markdown, or as JSON when `--json` is given on a read command.

use anyhow::{Context, Result};
use log::debug;
use streakguard_core::{
    display::{CancelResult, CreateResult, FrozenDays, Habits, OperationStatus, Periods},
    params::UserParams,
    FreezeError, HolidayService,
};

use crate::{
    args::{CheckArgs, HabitCommands, HolidayCommands, TierCommands},
    renderer::TerminalRenderer,
};

/// CLI command handler bound to one user
pub struct Cli {
    service: HolidayService,
    renderer: TerminalRenderer,
    user_id: String,
}

impl Cli {
    pub fn new(service: HolidayService, renderer: TerminalRenderer, user_id: String) -> Self {
        Self {
            service,
            renderer,
            user_id,
        }
    }

    fn user(&self) -> UserParams {
        UserParams {
            user_id: self.user_id.clone(),
        }
    }

    pub async fn handle_holiday_command(&self, command: HolidayCommands) -> Result<()> {
        match command {
            HolidayCommands::Active(output) => self.show_active(output.json).await,
            HolidayCommands::History(output) => self.show_history(output.json).await,
            HolidayCommands::CanCreate(args) => {
                let json = args.json;
                let outcome = self
                    .service
                    .can_create(&args.into_params(self.user_id.clone()))
                    .await
                    .context("Failed to check holiday allowance")?;
                if json {
                    self.renderer.render_json(&outcome)
                } else {
                    self.renderer.render(&outcome.to_string())
                }
            }
            HolidayCommands::Create(args) => {
                let params = args.into_params(self.user_id.clone())?;
                debug!("Creating holiday: {params:?}");
                let view = match self.service.create_period(&params).await {
                    Ok(view) => view,
                    Err(e) if e.requires_premium() => {
                        return Err(e).context(
                            "Failed to create holiday; upgrade with `streakguard tier set premium`",
                        );
                    }
                    Err(e) => return Err(e).context("Failed to create holiday"),
                };
                self.renderer.render(&CreateResult::new(view).to_string())
            }
            HolidayCommands::Cancel(args) => {
                let params = args.into_params(self.user_id.clone());
                match self.service.cancel_period(&params).await {
                    Ok(view) => self.renderer.render(&CancelResult(view).to_string()),
                    Err(e @ FreezeError::AlreadyInactive { .. }) => {
                        let status = OperationStatus::success(format!("{e}; nothing to cancel"));
                        self.renderer.render(&status.to_string())
                    }
                    Err(e) => Err(e).context("Failed to cancel holiday"),
                }
            }
            HolidayCommands::Stats(output) => {
                let stats = self
                    .service
                    .get_stats(&self.user())
                    .await
                    .context("Failed to load holiday stats")?;
                if output.json {
                    self.renderer.render_json(&stats)
                } else {
                    self.renderer.render(&stats.to_string())
                }
            }
        }
    }

    pub async fn handle_habit_command(&self, command: HabitCommands) -> Result<()> {
        match command {
            HabitCommands::List(output) => {
                let habits = self
                    .service
                    .get_habits_with_tasks(&self.user())
                    .await
                    .context("Failed to list habits")?;
                if output.json {
                    self.renderer.render_json(&habits)
                } else {
                    self.renderer.render(&Habits(habits).to_string())
                }
            }
            HabitCommands::Add(args) => {
                let habit = self
                    .service
                    .add_habit(&args.into_params(self.user_id.clone()))
                    .await
                    .context("Failed to add habit")?;
                self.renderer.render(&CreateResult::new(habit).to_string())
            }
            HabitCommands::AddTask(args) => {
                let task = self
                    .service
                    .add_task(&args.into_params(self.user_id.clone()))
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
        }
    }

    pub async fn handle_tier_command(&self, command: TierCommands) -> Result<()> {
        match command {
            TierCommands::Show => {
                let tier = self
                    .service
                    .get_tier(&self.user())
                    .await
                    .context("Failed to read plan tier")?;
                let status = OperationStatus::success(format!(
                    "User '{}' is on the {tier} plan",
                    self.user_id
                ));
                self.renderer.render(&status.to_string())
            }
            TierCommands::Set(args) => {
                let tier = self
                    .service
                    .set_tier(&args.into_params(self.user_id.clone()))
                    .await
                    .context("Failed to set plan tier")?;
                let status = OperationStatus::success(format!("Plan tier set to {tier}"));
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn handle_check(&self, args: CheckArgs) -> Result<()> {
        let json = args.json;
        let query = args.into_params(self.user_id.clone());

        if query.until.is_some() {
            let days = self
                .service
                .frozen_dates(&query)
                .await
                .context("Failed to list frozen days")?;
            return if json {
                self.renderer.render_json(&days)
            } else {
                self.renderer.render(&FrozenDays(days).to_string())
            };
        }

        let frozen = self
            .service
            .is_frozen(&query)
            .await
            .context("Failed to check frozen day")?;
        if json {
            self.renderer
                .render_json(&serde_json::json!({ "date": query.date, "frozen": frozen }))
        } else {
            self.renderer
                .render(&OperationStatus::frozen(&query.date, frozen).to_string())
        }
    }

    pub async fn show_active(&self, json: bool) -> Result<()> {
        let active = self
            .service
            .get_active_period(&self.user())
            .await
            .context("Failed to load active holiday")?;
        if json {
            return self.renderer.render_json(&active);
        }
        match active {
            Some(view) => self.renderer.render(&view.to_string()),
            None => self.renderer.render("No active holiday.\n"),
        }
    }

    async fn show_history(&self, json: bool) -> Result<()> {
        let history = self
            .service
            .get_history(&self.user())
            .await
            .context("Failed to load holiday history")?;
        if json {
            self.renderer.render_json(&history)
        } else {
            self.renderer.render(&Periods(history).to_string())
        }
    }
}
