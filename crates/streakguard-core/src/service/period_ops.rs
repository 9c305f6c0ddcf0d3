//! Holiday period operations for the HolidayService.

use jiff::civil::Date;

use super::HolidayService;
use crate::{
    allowance::{CanCreate, Validator},
    error::Result,
    freeze,
    models::{HolidayPeriod, HolidayStats, PeriodView},
    params::{CanCreateParams, CancelPeriod, CreatePeriod, FrozenQuery, UserParams},
    stats,
};

impl HolidayService {
    /// The user's current or scheduled period, with derived fields for today.
    ///
    /// Periods whose end date has passed are deactivated on the way and are
    /// not returned.
    pub async fn get_active_period(&self, params: &UserParams) -> Result<Option<PeriodView>> {
        let user_id = params.user_id.clone();
        let today = self.today();

        let period = self
            .with_db(move |db| db.get_active_period(&user_id, today))
            .await?;
        Ok(period.map(|p| PeriodView::new(p, today)))
    }

    /// Every period the user ever created, most recent first.
    pub async fn get_history(&self, params: &UserParams) -> Result<Vec<PeriodView>> {
        let user_id = params.user_id.clone();
        let today = self.today();

        let history = self.with_db(move |db| db.get_history(&user_id)).await?;
        Ok(history
            .into_iter()
            .map(|p| PeriodView::new(p, today))
            .collect())
    }

    /// Yearly usage and remaining allowance.
    pub async fn get_stats(&self, params: &UserParams) -> Result<HolidayStats> {
        let user_id = params.user_id.clone();
        let today = self.today();
        let tz = self.clock.time_zone().clone();
        let policy = self.policy;

        self.with_db(move |db| {
            let tier = db.get_tier(&user_id)?;
            let history = db.get_history(&user_id)?;
            let counts = db.habit_counts(&user_id)?;
            Ok(stats::aggregate(&history, tier, &policy, today, &tz, counts))
        })
        .await
    }

    /// Date-range and plan check for a prospective period.
    ///
    /// Rejections are reported in the returned [`CanCreate`]; only malformed
    /// dates and store failures are errors.
    pub async fn can_create(&self, params: &CanCreateParams) -> Result<CanCreate> {
        let (start, end) = params.dates()?;
        let stats = self
            .get_stats(&UserParams {
                user_id: params.user_id.clone(),
            })
            .await?;
        Ok(Validator::check_range(&stats, start, end, self.today()))
    }

    /// Validates and stores a new period.
    ///
    /// Scope, date parsing and date range errors are raised before the store
    /// is touched; the allowance and uniqueness checks run inside the store
    /// transaction.
    ///
    /// # Errors
    ///
    /// * `FreezeError::EmptySelection` / `InvalidInput` - malformed request
    /// * `FreezeError::InvalidDateRange` - end before start, or past start
    /// * `FreezeError::AllowanceExceeded` - plan quota used up
    /// * `FreezeError::ActivePeriodExists` - another period is still current
    /// * `FreezeError::CreateFailed` - store failure
    pub async fn create_period(&self, params: &CreatePeriod) -> Result<PeriodView> {
        let new = params.to_new_period()?;
        let today = self.today();
        Validator::check_dates(new.start_date, new.end_date, today)?;
        let now = self.clock.now();
        let tz = self.clock.time_zone().clone();
        let policy = self.policy;

        let period = self
            .with_db(move |db| db.create_period(&new, &policy, today, &tz, now))
            .await?;
        Ok(PeriodView::new(period, today))
    }

    /// Ends a period early.
    ///
    /// # Errors
    ///
    /// * `FreezeError::NotFound` - unknown id, or another user's period
    /// * `FreezeError::AlreadyInactive` - cancelled or expired already
    /// * `FreezeError::CancelFailed` - store failure
    pub async fn cancel_period(&self, params: &CancelPeriod) -> Result<PeriodView> {
        let user_id = params.user_id.clone();
        let id = params.id;
        let today = self.today();
        let now = self.clock.now();

        let period = self
            .with_db(move |db| db.cancel_period(&user_id, id, today, now))
            .await?;
        Ok(PeriodView::new(period, today))
    }

    /// Whether the queried day was actually frozen for the target, honouring
    /// early cancellations.
    pub async fn is_frozen(&self, params: &FrozenQuery) -> Result<bool> {
        let date = params.date()?;
        let target = params.target();
        let history = self.raw_history(&params.user_id).await?;

        Ok(freeze::was_date_frozen(
            date,
            &history,
            &target,
            self.clock.time_zone(),
        ))
    }

    /// Every frozen day in the queried range.
    pub async fn frozen_dates(&self, params: &FrozenQuery) -> Result<Vec<Date>> {
        let (from, to) = params.range()?;
        let target = params.target();
        let history = self.raw_history(&params.user_id).await?;

        Ok(freeze::frozen_dates(
            from,
            to,
            &history,
            &target,
            self.clock.time_zone(),
        ))
    }

    async fn raw_history(&self, user_id: &str) -> Result<Vec<HolidayPeriod>> {
        let user_id = user_id.to_string();
        self.with_db(move |db| db.get_history(&user_id)).await
    }
}
