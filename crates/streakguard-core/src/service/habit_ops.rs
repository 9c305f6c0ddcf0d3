//! Habit catalog and plan tier operations for the HolidayService.

use super::HolidayService;
use crate::{
    error::Result,
    models::{HabitWithTasks, PlanTier, TaskInfo},
    params::{AddHabit, AddTask, SetTier, UserParams},
};

impl HolidayService {
    /// The user's habits with their tasks, as offered in the scope picker.
    pub async fn get_habits_with_tasks(&self, params: &UserParams) -> Result<Vec<HabitWithTasks>> {
        let user_id = params.user_id.clone();
        self.with_db(move |db| db.get_habits_with_tasks(&user_id))
            .await
    }

    pub async fn add_habit(&self, params: &AddHabit) -> Result<HabitWithTasks> {
        let params = params.clone();
        let now = self.clock.now();
        self.with_db(move |db| {
            db.add_habit(
                &params.user_id,
                params.name.trim(),
                params.category.as_deref(),
                now,
            )
        })
        .await
    }

    pub async fn add_task(&self, params: &AddTask) -> Result<TaskInfo> {
        let params = params.clone();
        let now = self.clock.now();
        self.with_db(move |db| db.add_task(&params.user_id, &params.habit_id, &params.title, now))
            .await
    }

    pub async fn get_tier(&self, params: &UserParams) -> Result<PlanTier> {
        let user_id = params.user_id.clone();
        self.with_db(move |db| db.get_tier(&user_id)).await
    }

    /// Changes the user's plan tier; takes effect on the next check.
    pub async fn set_tier(&self, params: &SetTier) -> Result<PlanTier> {
        let tier = params.tier()?;
        let user_id = params.user_id.clone();
        let now = self.clock.now();
        self.with_db(move |db| db.set_tier(&user_id, tier, now))
            .await
    }
}
